use crate::animation::keyframe::{Keyframe, Pose};
use crate::animation::playback::{OutOfRange, RotationPath};
use crate::animation::values::inv_lerp;
use crate::errors::{CapacityKind, OrderingViolation, Result, RigError};

/// How many segments a cursor lookup scans forward before falling back to a
/// binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the segment of the previous lookup so that steady playback
/// finds its keyframes in O(1).
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Where a time falls relative to the keys of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The track has no keys.
    Empty,
    /// Earlier than the first key.
    BeforeFirst,
    /// At or after the last key.
    AfterLast,
    /// Between `prev` (inclusive) and `next = prev + 1` (exclusive).
    Between { prev: usize, next: usize },
}

/// An ordered sequence of keyframes with strictly increasing times.
#[derive(Debug, Clone, Default)]
pub struct KeyframeTrack {
    keyframes: Vec<Keyframe>,
    capacity: Option<usize>,
}

impl KeyframeTrack {
    /// An unbounded track.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A track that rejects insertions past `capacity` keys.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            keyframes: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Builds an unbounded track, validating every key as [`push`](Self::push) does.
    pub fn from_keyframes(keyframes: impl IntoIterator<Item = Keyframe>) -> Result<Self> {
        let mut track = Self::new();
        for keyframe in keyframes {
            track.push(keyframe)?;
        }
        Ok(track)
    }

    /// Appends a key after the existing ones.
    ///
    /// Keys are never reordered. A rejected key leaves the track untouched.
    pub fn push(&mut self, keyframe: Keyframe) -> Result<()> {
        let time = keyframe.time;
        if !time.is_finite() || time < 0.0 {
            return Err(RigError::InvalidKeyframeTime(time));
        }

        if let Some(capacity) = self.capacity
            && self.keyframes.len() >= capacity
        {
            return Err(RigError::CapacityExceeded {
                kind: CapacityKind::Keyframes,
                capacity,
            });
        }

        if let Some(last) = self.keyframes.last() {
            if (time - last.time).abs() <= f32::EPSILON {
                return Err(RigError::DegenerateInterpolation { time });
            }
            if time < last.time {
                return Err(OrderingViolation::KeyframeTime {
                    previous: last.time,
                    time,
                }
                .into());
            }
        }

        self.keyframes.push(keyframe);
        Ok(())
    }

    /// Time of the last key; zero for an empty track.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Keyframe> {
        self.keyframes.first()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }

    /// Finds the first key whose time exceeds `time`, starting from the
    /// cursor's segment.
    pub fn locate(&self, time: f32, cursor: &mut KeyframeCursor) -> Segment {
        let len = self.keyframes.len();
        if len == 0 {
            return Segment::Empty;
        }

        let start = cursor.last_index.min(len - 1);
        let next = self.scan_forward(start, time).unwrap_or_else(|| {
            // Jumped backwards (loop boundary) or far ahead
            self.keyframes.partition_point(|k| k.time <= time)
        });
        cursor.last_index = next.saturating_sub(1);

        if next == 0 {
            Segment::BeforeFirst
        } else if next == len {
            Segment::AfterLast
        } else {
            Segment::Between {
                prev: next - 1,
                next,
            }
        }
    }

    /// Index of the first key after `time`, looking only a few segments past
    /// `start`. `None` if the answer lies outside that window.
    fn scan_forward(&self, start: usize, time: f32) -> Option<usize> {
        let len = self.keyframes.len();
        if self.keyframes[start].time > time {
            return None;
        }

        let end = (start + 1 + MAX_SCAN_OFFSET).min(len);
        ((start + 1)..=end).find(|&next| next == len || self.keyframes[next].time > time)
    }

    /// Samples the pose at `time`.
    ///
    /// Fails only on a degenerate segment, which [`push`](Self::push) never
    /// lets into a track.
    pub fn sample_with_cursor(
        &self,
        time: f32,
        cursor: &mut KeyframeCursor,
        path: RotationPath,
        out_of_range: OutOfRange,
    ) -> Result<Pose> {
        let held = |keyframe: &Keyframe| match out_of_range {
            OutOfRange::Hold => keyframe.pose,
            OutOfRange::Identity => Pose::IDENTITY,
        };

        Ok(match self.locate(time, cursor) {
            Segment::Empty => Pose::IDENTITY,
            Segment::BeforeFirst => held(&self.keyframes[0]),
            Segment::AfterLast => held(&self.keyframes[self.keyframes.len() - 1]),
            Segment::Between { prev, next } => {
                let k0 = &self.keyframes[prev];
                let k1 = &self.keyframes[next];
                let t = inv_lerp(k0.time, k1.time, time)?;
                k0.pose.interpolate(&k1.pose, t, path)
            }
        })
    }

    /// Stateless variant of [`sample_with_cursor`](Self::sample_with_cursor).
    pub fn sample(&self, time: f32, path: RotationPath, out_of_range: OutOfRange) -> Result<Pose> {
        self.sample_with_cursor(time, &mut KeyframeCursor::default(), path, out_of_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn key(time: f32, y: f32) -> Keyframe {
        Keyframe::new(time, Vec3::new(0.0, y, 0.0), Quat::IDENTITY, Vec3::ONE)
    }

    fn track(times: &[f32]) -> KeyframeTrack {
        KeyframeTrack::from_keyframes(times.iter().map(|&t| key(t, t))).unwrap()
    }

    #[test]
    fn locate_segments() {
        let track = track(&[1.0, 2.0, 3.0]);
        let mut cursor = KeyframeCursor::default();

        assert_eq!(track.locate(0.5, &mut cursor), Segment::BeforeFirst);
        assert_eq!(
            track.locate(1.0, &mut cursor),
            Segment::Between { prev: 0, next: 1 }
        );
        assert_eq!(
            track.locate(2.5, &mut cursor),
            Segment::Between { prev: 1, next: 2 }
        );
        assert_eq!(track.locate(3.0, &mut cursor), Segment::AfterLast);
        assert_eq!(track.locate(9.0, &mut cursor), Segment::AfterLast);
    }

    #[test]
    fn cursor_survives_backward_jump() {
        let track = track(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let mut cursor = KeyframeCursor::default();

        assert_eq!(
            track.locate(6.5, &mut cursor),
            Segment::Between { prev: 6, next: 7 }
        );
        assert_eq!(cursor.last_index, 6);

        assert_eq!(
            track.locate(0.2, &mut cursor),
            Segment::Between { prev: 0, next: 1 }
        );
        assert_eq!(cursor.last_index, 0);
    }

    #[test]
    fn cursor_and_stateless_agree() {
        let track = track(&[0.0, 0.5, 1.0, 4.0, 4.5, 9.0]);
        let mut cursor = KeyframeCursor::default();

        for step in 0..200 {
            let time = step as f32 * 0.05;
            let a = track
                .sample_with_cursor(time, &mut cursor, RotationPath::Authored, OutOfRange::Hold)
                .unwrap();
            let b = track.sample(time, RotationPath::Authored, OutOfRange::Hold).unwrap();
            assert_eq!(a, b, "mismatch at t={time}");
        }
    }

    #[test]
    fn push_rejects_without_mutating() {
        let mut track = KeyframeTrack::bounded(2);
        track.push(key(0.0, 0.0)).unwrap();
        track.push(key(1.0, 1.0)).unwrap();

        assert_eq!(
            track.push(key(2.0, 2.0)),
            Err(RigError::CapacityExceeded {
                kind: CapacityKind::Keyframes,
                capacity: 2
            })
        );
        assert_eq!(track.len(), 2);
        assert_eq!(track.duration(), 1.0);
    }

    #[test]
    fn push_rejects_bad_times() {
        let mut track = track(&[0.0, 1.0]);

        assert_eq!(
            track.push(key(1.0, 0.0)),
            Err(RigError::DegenerateInterpolation { time: 1.0 })
        );
        assert_eq!(
            track.push(key(0.5, 0.0)),
            Err(RigError::OrderingViolation(OrderingViolation::KeyframeTime {
                previous: 1.0,
                time: 0.5
            }))
        );
        assert!(track.push(key(f32::NAN, 0.0)).is_err());
        assert_eq!(
            track.push(key(-1.0, 0.0)),
            Err(RigError::InvalidKeyframeTime(-1.0))
        );
        assert_eq!(track.len(), 2);
    }
}
