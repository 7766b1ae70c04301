/// Post-processing settings forwarded verbatim to the renderer.
///
/// The scene core never interprets these values; it only routes them to the
/// rendering backend through `Renderer::apply_effect`.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    pub enabled: bool,
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self { enabled: true, strength: 1.0, radius: 0.4, threshold: 0.85 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsaoSettings {
    pub enabled: bool,
    pub kernel_radius: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for SsaoSettings {
    fn default() -> Self {
        Self { enabled: true, kernel_radius: 8.0, min_distance: 0.005, max_distance: 0.1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMappingMode {
    None,
    Linear,
    Reinhard,
    Cineon,
    AcesFilmic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMappingSettings {
    pub mode: ToneMappingMode,
    pub exposure: f32,
}

impl Default for ToneMappingSettings {
    fn default() -> Self {
        Self { mode: ToneMappingMode::AcesFilmic, exposure: 1.0 }
    }
}

/// Per-range RGB shifts, each component in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorBalanceSettings {
    pub shadows: Vec3,
    pub midtones: Vec3,
    pub highlights: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AntiAliasing {
    None,
    #[default]
    Fxaa,
    Smaa,
    Msaa(u8),
}

/// One visual effect setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostEffect {
    Bloom(BloomSettings),
    Ssao(SsaoSettings),
    ToneMapping(ToneMappingSettings),
    ColorBalance(ColorBalanceSettings),
    AntiAliasing(AntiAliasing),
}

impl PostEffect {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            PostEffect::Bloom(_) => "bloom",
            PostEffect::Ssao(_) => "ssao",
            PostEffect::ToneMapping(_) => "tone_mapping",
            PostEffect::ColorBalance(_) => "color_balance",
            PostEffect::AntiAliasing(_) => "anti_aliasing",
        }
    }
}
