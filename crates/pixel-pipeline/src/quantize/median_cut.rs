use std::cmp::Ordering;
use std::collections::HashMap;

use crate::color::Rgb;
use crate::image::PixelImage;

#[derive(Debug, Clone, Copy)]
pub(super) struct HistogramEntry {
    pub color: Rgb,
    pub weight: u32,
}

/// Distinct colors of an image with their pixel counts, sorted by color.
pub(super) struct Histogram(Vec<HistogramEntry>);

impl Histogram {
    pub fn from_image(image: &PixelImage) -> Self {
        let mut counts: HashMap<Rgb, u32> = HashMap::new();
        for px in image.pixels() {
            *counts.entry(Rgb::from_slice(px)).or_insert(0) += 1;
        }

        let mut entries: Vec<HistogramEntry> = counts
            .into_iter()
            .map(|(color, weight)| HistogramEntry { color, weight })
            .collect();
        entries.sort_unstable_by_key(|e| e.color);

        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// An axis-aligned box of histogram entries in RGB space.
pub(super) struct ColorBox {
    entries: Vec<HistogramEntry>,
    weight: u64,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBox {
    fn new(entries: Vec<HistogramEntry>) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        let mut weight = 0u64;

        for e in &entries {
            let c = e.color.to_bytes();
            for ch in 0..3 {
                min[ch] = min[ch].min(c[ch]);
                max[ch] = max[ch].max(c[ch]);
            }
            weight += e.weight as u64;
        }

        Self {
            entries,
            weight,
            min,
            max,
        }
    }

    pub fn entries(&self) -> &[HistogramEntry] {
        &self.entries
    }

    /// Channel with the largest extent, and that extent. Lower channel
    /// index (R, then G, then B) wins on equal extents.
    fn widest_channel(&self) -> (usize, u8) {
        let mut best = (0, 0);
        for ch in 0..3 {
            let range = self.max[ch] - self.min[ch];
            if range > best.1 {
                best = (ch, range);
            }
        }
        best
    }

    fn can_split(&self) -> bool {
        self.entries.len() > 1
    }

    /// Split at the weighted median of the widest channel.
    ///
    /// Both halves are non-empty. Entries are ordered by the split channel
    /// and then by full color, so the cut is fully determined by the input.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (ch, _) = self.widest_channel();
        self.entries
            .sort_unstable_by_key(|e| (e.color.to_bytes()[ch], e.color));

        let half = self.weight.div_ceil(2);
        let mut acc = 0u64;
        let mut cut = self.entries.len() - 1;
        for (i, e) in self.entries.iter().enumerate() {
            acc += e.weight as u64;
            if acc >= half {
                cut = i + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.entries.len() - 1);

        let upper = self.entries.split_off(cut);
        (ColorBox::new(self.entries), ColorBox::new(upper))
    }

    /// Pixel-weighted mean color, rounded to nearest.
    pub fn mean(&self) -> Rgb {
        let mut sum = [0u64; 3];
        for e in &self.entries {
            let c = e.color.to_bytes();
            for ch in 0..3 {
                sum[ch] += c[ch] as u64 * e.weight as u64;
            }
        }
        let w = self.weight.max(1);
        let avg = |s: u64| ((s + w / 2) / w).min(255) as u8;
        Rgb::new(avg(sum[0]), avg(sum[1]), avg(sum[2]))
    }

    /// Split priority: widest extent first, then heavier box.
    fn priority_cmp(&self, other: &ColorBox) -> Ordering {
        self.widest_channel()
            .1
            .cmp(&other.widest_channel().1)
            .then(self.weight.cmp(&other.weight))
    }
}

/// Partition the histogram into at most `levels` boxes.
pub(super) fn median_cut(histogram: Histogram, levels: usize) -> Vec<ColorBox> {
    let mut boxes = vec![ColorBox::new(histogram.0)];

    while boxes.len() < levels {
        // first box with the highest priority
        let mut pick: Option<usize> = None;
        for (i, b) in boxes.iter().enumerate() {
            if !b.can_split() {
                continue;
            }
            match pick {
                Some(p) if boxes[p].priority_cmp(b) != Ordering::Less => {}
                _ => pick = Some(i),
            }
        }

        let Some(idx) = pick else {
            break;
        };

        let (lower, upper) = boxes.remove(idx).split();
        boxes.push(lower);
        boxes.push(upper);
    }

    boxes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(r: u8, g: u8, b: u8, weight: u32) -> HistogramEntry {
        HistogramEntry {
            color: Rgb::new(r, g, b),
            weight,
        }
    }

    #[test]
    fn test_split_follows_weighted_median() {
        // heavy entry at r=0 pulls the cut to the left
        let b = ColorBox::new(vec![
            entry(0, 0, 0, 10),
            entry(100, 0, 0, 1),
            entry(200, 0, 0, 1),
        ]);
        let (lo, hi) = b.split();
        assert_eq!(lo.entries().len(), 1);
        assert_eq!(hi.entries().len(), 2);
    }

    #[test]
    fn test_split_uses_widest_channel() {
        let b = ColorBox::new(vec![
            entry(10, 0, 0, 1),
            entry(12, 250, 0, 1),
            entry(11, 5, 0, 1),
            entry(13, 240, 0, 1),
        ]);
        assert_eq!(b.widest_channel().0, 1);
        let (lo, hi) = b.split();
        assert!(lo.entries().iter().all(|e| e.color.g < 10));
        assert!(hi.entries().iter().all(|e| e.color.g > 200));
    }

    #[test]
    fn test_stops_when_nothing_to_split() {
        let hist = Histogram(vec![entry(1, 1, 1, 3), entry(2, 2, 2, 3)]);
        let boxes = median_cut(hist, 10);
        assert_eq!(boxes.len(), 2);
    }
}
