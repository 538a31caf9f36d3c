use serde::{Deserialize, Serialize};

fn default_voice() -> String {
    "en-US-GuyNeural".to_string()
}

fn default_voices() -> Vec<String> {
    vec![
        "en-US-GuyNeural".to_string(),
        "en-US-AriaNeural".to_string(),
        "en-GB-RyanNeural".to_string(),
        "en-GB-SoniaNeural".to_string(),
    ]
}

fn default_player() -> String {
    "edge-playback".to_string()
}

fn default_player_args() -> Vec<String> {
    vec![
        "--voice".to_string(),
        "{voice}".to_string(),
        "--text".to_string(),
        "{text}".to_string(),
    ]
}

fn default_poll_interval_ms() -> u64 {
    100
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_voices")]
    pub voices: Vec<String>,
    /// Program that synthesizes and plays one utterance
    #[serde(default = "default_player")]
    pub player: String,
    /// `{voice}` and `{text}` are substituted; without `{text}` the text goes to stdin
    #[serde(default = "default_player_args")]
    pub player_args: Vec<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl SpeechConfig {
    pub fn knows_voice(&self, voice: &str) -> bool {
        self.voices.iter().any(|v| v == voice)
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            voices: default_voices(),
            player: default_player(),
            player_args: default_player_args(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
