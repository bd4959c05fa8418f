pub mod settings;
pub mod voice_tools;

pub use settings::VoiceToolsSettings;
pub use voice_tools::VoiceTools;
