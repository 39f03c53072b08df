use core::time::Duration;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dicom_decode_task_common::{ImageFrameInfo, PixelRepresentation, SampleBuffer, SampleView};
use std::hint::black_box;

fn make_buffer(len: usize) -> SampleBuffer {
    let bytes = (0..len).map(|x| (x * 31 % 251) as u8).collect();
    SampleBuffer::from_vec(bytes)
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Min/Max Scan");
    let rows = 2048;
    let columns = 2048;

    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(15));

    for (bits_allocated, representation) in [
        (8, PixelRepresentation::Unsigned),
        (16, PixelRepresentation::Unsigned),
        (16, PixelRepresentation::Signed),
        (32, PixelRepresentation::Signed),
    ] {
        let frame = ImageFrameInfo::new(rows, columns, bits_allocated, 1, representation);
        let size = frame.expected_len().unwrap();
        let buffer = make_buffer(size);
        let name = format!("{bits_allocated}-bit {representation:?}");

        group.throughput(criterion::Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("scan", name), &buffer, |b, buffer| {
            b.iter(|| {
                let view = SampleView::for_frame(black_box(buffer), &frame).unwrap();
                black_box(view.min_max())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
