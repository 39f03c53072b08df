use core::time::Duration;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dicom_decode_task_common::PlanarConfiguration;
use dicom_decode_task_rle::rle::planes::PlaneLayout;
use dicom_decode_task_rle::RleDecoder;
use endian_writer::{EndianWriter, LittleEndianWriter};
use std::hint::black_box;

/// PackBits encodes `plane` as alternating literal and replicate runs of up to 128 bytes.
fn pack_plane(plane: &[u8], out: &mut Vec<u8>) {
    for (index, chunk) in plane.chunks(128).enumerate() {
        if index % 2 == 0 {
            out.push((chunk.len() - 1) as u8);
            out.extend_from_slice(chunk);
        } else {
            out.push((1 - chunk.len() as isize) as u8);
            out.push(chunk[0]);
        }
    }
    if out.len() % 2 == 1 {
        out.push(0);
    }
}

fn make_frame(layout: &PlaneLayout) -> Vec<u8> {
    let mut data = vec![0u8; 64];
    let mut offsets = Vec::new();
    for segment in 0..layout.plane_count() {
        offsets.push(data.len() as u32);
        let plane: Vec<u8> = (0..layout.pixels)
            .map(|x| (x * 31 % 251 + segment) as u8)
            .collect();
        pack_plane(&plane, &mut data);
    }

    let mut writer = unsafe { LittleEndianWriter::new(data.as_mut_ptr()) };
    unsafe {
        writer.write_u32_at(offsets.len() as u32, 0);
        for (index, &offset) in offsets.iter().enumerate() {
            writer.write_u32_at(offset, (4 + index * 4) as isize);
        }
    }
    data
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("RLE Decode");
    let pixels = 1024 * 1024;
    let decoder = RleDecoder::new();

    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(15));

    for (name, samples_per_pixel, bytes_per_sample) in [
        ("8-bit monochrome", 1, 1),
        ("16-bit monochrome", 1, 2),
        ("8-bit rgb", 3, 1),
    ] {
        let layout = PlaneLayout {
            pixels,
            samples_per_pixel,
            bytes_per_sample,
            planar_configuration: PlanarConfiguration::Interleaved,
        };
        let data = make_frame(&layout);

        group.throughput(criterion::Throughput::Bytes(
            (pixels * layout.plane_count()) as u64,
        ));
        group.bench_with_input(BenchmarkId::new("decode_frame", name), &data, |b, data| {
            b.iter(|| black_box(decoder.decode_frame(black_box(data), &layout)))
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
