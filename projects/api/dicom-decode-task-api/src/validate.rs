//! Pixel intensity range validation.
//!
//! Downstream rendering windows images using `smallestPixelValue` and
//! `largestPixelValue`, which are frequently wrong in vendor supplied
//! metadata. By default the declared values are replaced with the computed
//! extrema; in strict mode they are left alone and each disagreement is
//! reported as a [`ValidationWarning`].

use dicom_decode_task_common::ImageFrame;
use serde::Serialize;
use std::fmt;

/// What the validator does with a declared intensity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinMaxPolicy {
    /// Replace the declared range with the computed extrema.
    #[default]
    Overwrite,
    /// Keep the declared range and report mismatches.
    Strict,
}

impl MinMaxPolicy {
    #[inline]
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            MinMaxPolicy::Strict
        } else {
            MinMaxPolicy::Overwrite
        }
    }
}

/// A declared intensity range field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PixelValueField {
    SmallestPixelValue,
    LargestPixelValue,
}

impl fmt::Display for PixelValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PixelValueField::SmallestPixelValue => "smallestPixelValue",
            PixelValueField::LargestPixelValue => "largestPixelValue",
        })
    }
}

/// A declared intensity range field that disagrees with the decoded samples.
///
/// Non-fatal. Returned alongside a successful result; never fails a task and
/// never accompanies a change to the frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub field: PixelValueField,
    pub declared: Option<i64>,
    pub computed: i64,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.declared {
            Some(declared) => write!(
                f,
                "Declared {} {} does not match computed {}",
                self.field, declared, self.computed
            ),
            None => write!(
                f,
                "{} is not declared, computed {}",
                self.field, self.computed
            ),
        }
    }
}

impl std::error::Error for ValidationWarning {}

/// Non-fatal findings attached to a task result.
pub type Diagnostic = ValidationWarning;

/// Computes frame extrema and applies a [`MinMaxPolicy`] to the declared range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinMaxValidator {
    policy: MinMaxPolicy,
}

impl MinMaxValidator {
    pub fn new(policy: MinMaxPolicy) -> Self {
        Self { policy }
    }

    pub fn from_strict(strict: bool) -> Self {
        Self::new(MinMaxPolicy::from_strict(strict))
    }

    #[inline]
    pub fn policy(&self) -> MinMaxPolicy {
        self.policy
    }

    /// Scans the samples of `frame` once and applies the policy.
    ///
    /// Only the declared range fields of `frame` can change, and only under
    /// [`MinMaxPolicy::Overwrite`]. Returns the mismatches found under
    /// [`MinMaxPolicy::Strict`]; always empty otherwise.
    pub fn apply(&self, frame: &mut ImageFrame) -> Vec<Diagnostic> {
        // A valid frame has at least one sample.
        let Some(extrema) = frame.samples().min_max() else {
            return Vec::new();
        };

        match self.policy {
            MinMaxPolicy::Overwrite => {
                frame.set_pixel_range(extrema);
                Vec::new()
            }
            MinMaxPolicy::Strict => {
                let info = frame.info();
                if extrema.matches(info.smallest_pixel_value, info.largest_pixel_value) {
                    return Vec::new();
                }

                let fields = [
                    (
                        PixelValueField::SmallestPixelValue,
                        info.smallest_pixel_value,
                        extrema.min,
                    ),
                    (
                        PixelValueField::LargestPixelValue,
                        info.largest_pixel_value,
                        extrema.max,
                    ),
                ];

                fields
                    .into_iter()
                    .filter(|&(_, declared, computed)| declared != Some(computed))
                    .map(|(field, declared, computed)| {
                        let warning = ValidationWarning {
                            field,
                            declared,
                            computed,
                        };
                        log::warn!("{warning}");
                        warning
                    })
                    .collect()
            }
        }
    }
}
