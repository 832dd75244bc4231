use bon::Builder;

/// Color representation for face elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Font size and fill color for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(font_size: f32, color: Color) -> Self {
        Self { font_size, color }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(16.0, Color::new(0xe8, 0xe8, 0xe8))
    }
}

/// Appearance of one ring of 60 ticks.
///
/// Tick count, angular step and emphasis interval are fixed, see
/// [`crate::dial`].
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DialConfig {
    #[builder(default = 10.0)]
    pub normal_tick_length: f64,
    #[builder(default = 20.0)]
    pub emphasis_tick_length: f64,
    #[builder(default = Color::new(0x9a, 0x9a, 0x9a))]
    pub tick_color: Color,
    #[builder(default = 2.0)]
    pub tick_stroke_width: f32,
    #[builder(default = 8.0)]
    pub label_top_padding: f64,
    #[builder(default)]
    pub label_style: TextStyle,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DialConfig {
    /// Outer ring: longer ticks and slightly larger labels.
    pub fn seconds() -> Self {
        Self::builder()
            .normal_tick_length(12.0)
            .emphasis_tick_length(24.0)
            .label_top_padding(10.0)
            .label_style(TextStyle::new(16.0, Color::new(0xe8, 0xe8, 0xe8)))
            .build()
    }

    /// Inner ring.
    pub fn minutes() -> Self {
        Self::builder()
            .normal_tick_length(8.0)
            .emphasis_tick_length(16.0)
            .label_top_padding(6.0)
            .tick_color(Color::new(0x6e, 0x6e, 0x6e))
            .label_style(TextStyle::new(14.0, Color::new(0xc0, 0xc0, 0xc0)))
            .build()
    }
}

/// Complete face configuration.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ClockConfig {
    #[builder(default = "dialclock".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 480)]
    pub window_width: usize,
    #[builder(default = 480)]
    pub window_height: usize,

    // Dials
    #[builder(default = DialConfig::seconds())]
    pub seconds_dial: DialConfig,
    #[builder(default = DialConfig::minutes())]
    pub minutes_dial: DialConfig,
    /// Radius difference between the outer and the inner ring.
    #[builder(default = 72.0)]
    pub inner_dial_inset: f64,

    // Hour label
    #[builder(default = TextStyle::new(56.0, Color::new(0xff, 0xff, 0xff)))]
    pub hour_label_style: TextStyle,

    // Overlay notch
    #[builder(default = Color::new(0xff, 0x8c, 0x00))]
    pub overlay_stroke_color: Color,
    #[builder(default = 2.0)]
    pub overlay_stroke_width: f32,

    // Colors
    #[builder(default = Color::new(0x10, 0x10, 0x12))]
    pub background_color: Color,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
