use crate::assets::AssetLoader;
use crate::error::ConfigError;
use pixel_pipeline::{Palette, PaletteError, PipelineConfig, ResampleFilter, Rgb, Rgba};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Target palette, in tie-break order
    #[serde(default)]
    pub palette: Vec<ColorEntry>,

    /// Recipe parameters
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// HTTP limits and CORS
    #[serde(default)]
    pub server: ServerSettings,
}

/// A palette entry: `"#RRGGBB"`, `"#RGB"` or `[r, g, b]`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorEntry {
    Hex(String),
    Rgb([u8; 3]),
}

impl ColorEntry {
    fn to_rgb(&self, index: usize) -> Result<Rgb, PaletteError> {
        match self {
            ColorEntry::Hex(s) => s
                .parse()
                .map_err(|source| PaletteError::ParseColor { index, source }),
            ColorEntry::Rgb(c) => Ok(Rgb::from(*c)),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    pub pixel_size: u32,
    /// Filter name; unknown names mean nearest
    pub filter: String,
    pub first_quantize_levels: usize,
    pub second_quantize_levels: usize,
    pub output_size: u32,
    pub pad_to_square: bool,
    /// `#RGBA`/`#RRGGBBAA`, or opaque `#RGB`/`#RRGGBB`
    pub pad_color: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            pixel_size: PipelineConfig::DEFAULT_PIXEL_SIZE,
            filter: ResampleFilter::Nearest.name().to_string(),
            first_quantize_levels: PipelineConfig::DEFAULT_FIRST_QUANTIZE_LEVELS,
            second_quantize_levels: PipelineConfig::DEFAULT_SECOND_QUANTIZE_LEVELS,
            output_size: PipelineConfig::DEFAULT_OUTPUT_SIZE,
            pad_to_square: false,
            pad_color: "#0000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
    /// Largest accepted `pixel_size` form value
    pub max_pixel_size: u32,
    /// Allowed CORS origins; `"*"` allows any
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            max_pixel_size: 256,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerSettings {
    /// Check a requested grid size against `1..=max_pixel_size`.
    pub fn check_pixel_size(&self, size: u32) -> Result<u32, String> {
        let max = self.max_pixel_size;
        if size == 0 || size > max {
            return Err(format!("pixel_size must be between 1 and {max}, got {size}"));
        }
        Ok(size)
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    ///
    /// Unlike most settings, a missing or broken palette is fatal: there is
    /// nothing sensible to snap to.
    pub fn load_from_assets(loader: &AssetLoader) -> Result<Self, ConfigError> {
        let content = loader.read_config_string()?;
        let config = Self::parse(&content)?;
        tracing::info!(
            palette = config.palette.len(),
            pixel_size = config.pipeline.pixel_size,
            filter = %config.pipeline.filter,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate YAML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.build_palette()?;
        config.pad_color()?;
        config.pipeline_config()?;
        Ok(config)
    }

    /// Build the target palette.
    pub fn build_palette(&self) -> Result<Palette, PaletteError> {
        let colors = self
            .palette
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.to_rgb(i))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(colors)
    }

    /// Square-padding fill color.
    pub fn pad_color(&self) -> Result<Rgba, ConfigError> {
        let color = &self.pipeline.pad_color;
        color.parse().map_err(|e| ConfigError::Invalid {
            field: "pad_color",
            message: format!("{color}: {e}"),
        })
    }

    /// Translate the `pipeline` section into core parameters.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigError> {
        let p = &self.pipeline;
        let pad = if p.pad_to_square {
            Some(self.pad_color()?)
        } else {
            None
        };

        let config = PipelineConfig::new()
            .pixel_size(p.pixel_size)
            .filter(ResampleFilter::from_name(&p.filter))
            .first_quantize_levels(p.first_quantize_levels)
            .second_quantize_levels(p.second_quantize_levels)
            .output_size(p.output_size)
            .pad_to_square(pad);
        config.validate().map_err(|e| ConfigError::Invalid {
            field: "pipeline",
            message: e.to_string(),
        })?;
        Ok(config)
    }
}
