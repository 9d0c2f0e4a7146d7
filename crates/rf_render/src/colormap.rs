// crates/rf_render/src/colormap.rs

//! 连续色带
//!
//! 色带由一组严格递增的色标构成，采样时在相邻色标之间
//! 做线性 RGB 空间插值（先转线性空间再插值，避免 gamma 失真）。

/// 单个色标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// 值域位置
    pub v: f64,
    /// sRGB 8-bit 三元组
    pub rgb: [u8; 3],
}

/// 连续色带：色标值严格递增
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// 色标序列
    pub stops: Vec<ColorStop>,
    /// 值域下界
    pub vmin: f64,
    /// 值域上界
    pub vmax: f64,
}

impl Palette {
    /// 从色标序列创建
    ///
    /// 色标值必须严格递增，否则返回 `None`。
    pub fn from_stops(stops: Vec<ColorStop>) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }
        for i in 1..stops.len() {
            if stops[i].v <= stops[i - 1].v {
                return None;
            }
        }
        let vmin = stops[0].v;
        let vmax = stops[stops.len() - 1].v;
        Some(Self { stops, vmin, vmax })
    }

    /// 在 x 处采样（线性 RGB 插值，gamma 校正）
    ///
    /// x 被钳位到 [vmin, vmax]。
    pub fn sample(&self, x: f64) -> [u8; 3] {
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0].rgb;
        }
        let x = x.clamp(self.vmin, self.vmax);

        // 定位区间 [i, i+1]，色标数量很小，线性扫描即可
        let mut i = 0usize;
        if x >= self.stops[n - 1].v {
            i = n - 2;
        } else {
            for k in 0..n - 1 {
                if x <= self.stops[k + 1].v {
                    i = k;
                    break;
                }
            }
        }
        let a = self.stops[i];
        let b = self.stops[i + 1];
        let t = if b.v > a.v { (x - a.v) / (b.v - a.v) } else { 0.0 };

        let la = srgb_to_linear_rgb(a.rgb);
        let lb = srgb_to_linear_rgb(b.rgb);
        [
            linear_to_srgb_u8(la[0] + t * (lb[0] - la[0])),
            linear_to_srgb_u8(la[1] + t * (lb[1] - la[1])),
            linear_to_srgb_u8(la[2] + t * (lb[2] - la[2])),
        ]
    }
}

/// 默认热力色带：深蓝 → 青 → 黄 → 红，值域 [0, 1]
pub fn default_heat_palette() -> Palette {
    Palette {
        stops: vec![
            ColorStop {
                v: 0.0,
                rgb: [13, 8, 135],
            },
            ColorStop {
                v: 0.33,
                rgb: [0, 170, 170],
            },
            ColorStop {
                v: 0.66,
                rgb: [247, 208, 60],
            },
            ColorStop {
                v: 1.0,
                rgb: [217, 30, 30],
            },
        ],
        vmin: 0.0,
        vmax: 1.0,
    }
}

#[inline]
fn srgb_to_linear_rgb(rgb: [u8; 3]) -> [f64; 3] {
    [
        srgb_to_linear(rgb[0]),
        srgb_to_linear(rgb[1]),
        srgb_to_linear(rgb[2]),
    ]
}

#[inline]
fn srgb_to_linear(c: u8) -> f64 {
    let x = f64::from(c) / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb_u8(c: f64) -> u8 {
    let y = if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (y.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8
}
