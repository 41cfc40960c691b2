//! Micro-chart geometry for 7-day sparklines
//!
//! Samples are laid out on a fixed-size surface with y growing downwards, the
//! same convention a vector canvas uses. Renderers map the surface onto
//! whatever cell grid they have.

/// Drawing surface in abstract units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 140.0,
            height: 56.0,
            padding: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct SparklineGeometry {
    surface: Surface,
    points: Vec<ChartPoint>,
    trend: Trend,
    min: f64,
    max: f64,
}

impl SparklineGeometry {
    /// Lay out `series`; nothing is drawn for a missing series or a single sample.
    pub fn compute(series: Option<&[f64]>, surface: Surface) -> Option<Self> {
        let series = series.filter(|s| s.len() > 1)?;

        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 {
            1.0
        } else {
            max - min
        };

        let inner_w = surface.width - surface.padding * 2.0;
        let inner_h = surface.height - surface.padding * 2.0;
        let last_index = (series.len() - 1) as f64;

        let points = series
            .iter()
            .enumerate()
            .map(|(i, &v)| ChartPoint {
                index: i,
                x: (i as f64 / last_index) * inner_w + surface.padding,
                y: surface.height - ((v - min) / range) * inner_h - surface.padding,
                value: v,
            })
            .collect();

        let trend = if series[series.len() - 1] >= series[0] {
            Trend::Up
        } else {
            Trend::Down
        };

        Some(Self {
            surface,
            points,
            trend,
            min,
            max,
        })
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sample closest to `pointer_x` horizontally; ties go to the earlier sample
    pub fn nearest(&self, pointer_x: f64) -> ChartPoint {
        let mut nearest = self.points[0];
        let mut best = f64::INFINITY;
        for p in &self.points {
            let d = (p.x - pointer_x).abs();
            if d < best {
                best = d;
                nearest = *p;
            }
        }
        nearest
    }

    pub fn point(&self, index: usize) -> Option<ChartPoint> {
        self.points.get(index).copied()
    }

    /// Vertical spans `(x, top, baseline)` filling the area under the line,
    /// one every `step` surface units across the padded width
    pub fn area_columns(&self, step: f64) -> Vec<(f64, f64, f64)> {
        if step <= 0.0 || self.points.len() < 2 {
            return Vec::new();
        }
        let baseline = self.surface.height - self.surface.padding;
        let end = self.surface.width - self.surface.padding;

        let mut columns = Vec::new();
        let mut segment = 0;
        let mut x = self.surface.padding;
        while x <= end + 1e-9 {
            while segment + 2 < self.points.len() && self.points[segment + 1].x < x {
                segment += 1;
            }
            let (a, b) = (self.points[segment], self.points[segment + 1]);
            let t = if b.x > a.x {
                ((x - a.x) / (b.x - a.x)).clamp(0.0, 1.0)
            } else {
                0.0
            };
            columns.push((x, a.y + (b.y - a.y) * t, baseline));
            x += step;
        }
        columns
    }
}

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One-line text sparkline, resampled to `width` cells
pub fn block_sparkline(series: &[f64], width: usize) -> String {
    if series.len() < 2 || width == 0 {
        return String::new();
    }
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 {
        1.0
    } else {
        max - min
    };
    let last = series.len() - 1;

    (0..width)
        .map(|col| {
            let idx = if width == 1 {
                last
            } else {
                (col * last + (width - 1) / 2) / (width - 1)
            };
            let level = ((series[idx] - min) / range * (BLOCKS.len() - 1) as f64).round();
            BLOCKS[(level.max(0.0) as usize).min(BLOCKS.len() - 1)]
        })
        .collect()
}

/// Rough age of sample `index` in a 7-day series of `len` samples
pub fn hours_ago(index: usize, len: usize) -> f64 {
    if len < 2 {
        return 0.0;
    }
    let step = 168.0 / (len - 1) as f64;
    (len - 1 - index.min(len - 1)) as f64 * step
}
