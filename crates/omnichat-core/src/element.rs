//! Dynamic overlay elements injected over the simulated UI

use uuid::Uuid;

/// Unique overlay identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accent color of a preset widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentColor {
    Red,
    Orange,
    Indigo,
    Blue,
}

/// Icon shown in a preset widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetIcon {
    WifiOff,
    ServerCrash,
    Sparkles,
    AlertTriangle,
    Info,
}

/// Strongly-typed properties shared by the preset widgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetProps {
    pub title: String,
    pub description: String,
    pub color: AccentColor,
    pub icon: WidgetIcon,
}

impl WidgetProps {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        color: AccentColor,
        icon: WidgetIcon,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            icon,
        }
    }
}

/// What an overlay element shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    ErrorToast(WidgetProps),
    ServerDownModal(WidgetProps),
    BetaBanner(WidgetProps),
    /// Markup produced by the generative model
    RawMarkup(String),
}

impl ElementKind {
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::ErrorToast(_) => "Error toast",
            ElementKind::ServerDownModal(_) => "Server down modal",
            ElementKind::BetaBanner(_) => "Beta banner",
            ElementKind::RawMarkup(_) => "Generated widget",
        }
    }

    pub fn is_modal(&self) -> bool {
        matches!(self, ElementKind::ServerDownModal(_))
    }
}

/// Preset widget kinds offered by the inject menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetWidget {
    ErrorToast,
    ServerDown,
    BetaBanner,
}

impl PresetWidget {
    pub const ALL: [PresetWidget; 3] = [
        PresetWidget::ErrorToast,
        PresetWidget::ServerDown,
        PresetWidget::BetaBanner,
    ];

    pub fn menu_label(self) -> &'static str {
        match self {
            PresetWidget::ErrorToast => "Fake Error Toast",
            PresetWidget::ServerDown => "Fake Server Down",
            PresetWidget::BetaBanner => "Fake Beta Banner",
        }
    }

    /// Build the element kind with the stock copy for this preset
    pub fn build(self) -> ElementKind {
        match self {
            PresetWidget::ErrorToast => ElementKind::ErrorToast(WidgetProps::new(
                "Connection Error",
                "Failed to connect to the neural engine.",
                AccentColor::Red,
                WidgetIcon::WifiOff,
            )),
            PresetWidget::ServerDown => ElementKind::ServerDownModal(WidgetProps::new(
                "System Outage",
                "Our servers are currently experiencing high load. Please try again later.",
                AccentColor::Orange,
                WidgetIcon::ServerCrash,
            )),
            PresetWidget::BetaBanner => ElementKind::BetaBanner(WidgetProps::new(
                "New Model Available",
                "Try the experimental Gemini 1.5 Pro model now.",
                AccentColor::Indigo,
                WidgetIcon::Sparkles,
            )),
        }
    }
}

/// A transient overlay widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicElement {
    pub id: ElementId,
    pub kind: ElementKind,
}

impl DynamicElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
        }
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Self::new(ElementKind::RawMarkup(markup.into()))
    }
}
