// Copyright 2025 wrightlabs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-capacity rolling history for frame-rate samples.

/// A fixed-size circular buffer that evicts the oldest sample when full.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    data: [T; N],
    index: usize,
    count: usize,
}

impl<T: Default + Copy, const N: usize> RingBuffer<T, N> {
    /// Creates a new, empty ring buffer.
    pub fn new() -> Self {
        Self {
            data: [T::default(); N],
            index: 0,
            count: 0,
        }
    }

    /// Pushes a new value, overwriting the oldest one if the buffer is full.
    pub fn push(&mut self, value: T) {
        self.data[self.index] = value;
        self.index = (self.index + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Returns the number of samples currently held.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if no samples have been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the most recently pushed value, if any.
    pub fn latest(&self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let slot = (self.index + N - 1) % N;
        Some(self.data[slot])
    }

    /// Discards all samples.
    pub fn clear(&mut self) {
        self.index = 0;
        self.count = 0;
    }

    /// Returns an iterator over the samples in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let (wrapped, oldest) = self.data.split_at(self.index);
        if self.count < N {
            // Not yet full: the slots before the write index hold every sample in order.
            wrapped[..self.count].iter().chain(oldest[..0].iter())
        } else {
            oldest.iter().chain(wrapped.iter())
        }
    }
}

impl<T: Default + Copy, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<f32, N> {
    /// Arithmetic mean of the retained samples, or 0.0 if empty.
    pub fn average(&self) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        self.iter().sum::<f32>() / self.count as f32
    }

    /// Smallest retained sample, if any.
    pub fn min(&self) -> Option<f32> {
        if self.count == 0 {
            return None;
        }
        Some(self.iter().copied().fold(f32::MAX, f32::min))
    }

    /// Largest retained sample, if any.
    pub fn max(&self) -> Option<f32> {
        if self.count == 0 {
            return None;
        }
        Some(self.iter().copied().fold(f32::MIN, f32::max))
    }

    /// Difference between the largest and smallest retained sample.
    ///
    /// A wide spread means inconsistent pacing even when the average looks fine.
    pub fn spread(&self) -> f32 {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => max - min,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iter_chronological() {
        let mut rb = RingBuffer::<f32, 3>::new();
        rb.push(1.0);
        rb.push(2.0);
        rb.push(3.0);
        rb.push(4.0); // Overwrites 1.0

        let values: Vec<f32> = rb.iter().copied().collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        assert_eq!(rb.count(), 3);
    }

    #[test]
    fn test_oldest_sample_evicted_first() {
        let mut rb = RingBuffer::<f32, 4>::new();
        for fps in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0] {
            rb.push(fps);
        }
        // The two oldest samples (10, 20) are gone.
        assert_eq!(rb.min(), Some(30.0));
        assert_eq!(rb.max(), Some(60.0));
        assert_eq!(rb.latest(), Some(60.0));
    }

    #[test]
    fn test_average_partial_fill() {
        let mut rb = RingBuffer::<f32, 4>::new();
        rb.push(10.0);
        rb.push(20.0);
        assert_eq!(rb.average(), 15.0);
        assert_eq!(rb.count(), 2);
    }

    #[test]
    fn test_spread() {
        let mut rb = RingBuffer::<f32, 4>::new();
        rb.push(44.0);
        rb.push(58.0);
        rb.push(51.0);
        assert!((rb.spread() - 14.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_buffer() {
        let rb = RingBuffer::<f32, 4>::new();
        assert_eq!(rb.average(), 0.0);
        assert_eq!(rb.min(), None);
        assert_eq!(rb.max(), None);
        assert_eq!(rb.spread(), 0.0);
        assert!(rb.is_empty());
        assert_eq!(rb.latest(), None);
    }

    #[test]
    fn test_clear_resets() {
        let mut rb = RingBuffer::<f32, 3>::new();
        rb.push(30.0);
        rb.push(45.0);
        rb.clear();
        assert!(rb.is_empty());
        assert_eq!(rb.iter().count(), 0);
    }
}
