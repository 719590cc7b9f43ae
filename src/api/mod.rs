mod input;
mod plot_data;
mod render_coordinator;
mod session;

pub use input::{ButtonState, InputSnapshot, InputSource, ScriptedInput};
pub use plot_data::{GridConfig, LegendConfig, PlotData, Series, SeriesKind, Style, TitlesConfig};
pub use render_coordinator::{BORDER_COLOR, CLEAR_COLOR, RenderCoordinator, ZOOM_OVERLAY_COLOR};
pub use session::{
    FrameOutcome, HeadlessPlatform, Platform, PlotSession, SessionStatus, WindowConfig,
    run_interactive_session, run_interactive_session_with,
};
