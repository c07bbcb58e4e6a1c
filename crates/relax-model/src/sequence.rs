use std::ops::Index;

use crate::{ModelError, Target, TargetKind};

/// Ordered, validated list of targets for one play session.
///
/// Start times are non-decreasing; taps have no duration; holds carry a
/// non-empty path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetSequence {
    targets: Vec<Target>,
}

impl TargetSequence {
    pub fn new(targets: Vec<Target>) -> Result<Self, ModelError> {
        let mut previous = i32::MIN;
        for (index, target) in targets.iter().enumerate() {
            if target.start_time < previous {
                return Err(ModelError::NonMonotonic {
                    index,
                    start_time: target.start_time,
                    previous,
                });
            }
            if target.end_time < target.start_time {
                return Err(ModelError::EndBeforeStart {
                    index,
                    start_time: target.start_time,
                    end_time: target.end_time,
                });
            }
            match target.kind {
                TargetKind::Tap if target.duration() != 0 => {
                    return Err(ModelError::TapWithDuration {
                        index,
                        duration: target.duration(),
                    });
                }
                TargetKind::Hold if target.path.as_ref().is_none_or(|p| p.points.is_empty()) => {
                    return Err(ModelError::EmptyHoldPath { index });
                }
                _ => {}
            }
            previous = target.start_time;
        }

        Ok(Self { targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }
}

impl Index<usize> for TargetSequence {
    type Output = Target;

    fn index(&self, index: usize) -> &Target {
        &self.targets[index]
    }
}

impl<'a> IntoIterator for &'a TargetSequence {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}
