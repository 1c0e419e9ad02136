//! Text-to-speech through a speech command (`say` on macOS).
//!
//! One utterance plays at a time. `stop` kills the running speech process.

use parking_lot::Mutex;
use std::io::Write;
use std::process::{Child, Command, Stdio};

use selected_core::CapabilityError;
use selected_plugin_api::{SpeechSynthesizer, Utterance};

/// Default speech program.
pub const SAY: &str = "say";

/// Speaks by piping text to a child process.
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
    current: Mutex<Option<Child>>,
}

impl CommandSpeech {
    /// Create a synthesizer driving `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current: Mutex::new(None),
        }
    }

    /// Pass extra arguments to the program before the text is piped in.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Whether an utterance is still playing.
    pub fn is_speaking(&self) -> bool {
        match self.current.lock().as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Process id of the current utterance, if any.
    pub fn current_pid(&self) -> Option<u32> {
        self.current.lock().as_ref().map(Child::id)
    }
}

/// Kill a speech process if it is still running, then wait on it.
fn reap(mut child: Child) -> Result<(), CapabilityError> {
    let killed = match child.try_wait() {
        Ok(None) => {
            tracing::debug!("Stopping speech");
            child.kill()
        }
        _ => Ok(()),
    };
    let _ = child.wait();
    killed.map_err(CapabilityError::from)
}

impl Default for CommandSpeech {
    fn default() -> Self {
        Self::new(SAY)
    }
}

/// Text with `say` embedded commands for the utterance's volume.
///
/// `say` has no relative pitch control, so pitch is left to the voice.
fn embed_volume(utterance: &Utterance) -> String {
    format!("[[volm {:.2}]] {}", utterance.volume, utterance.text)
}

impl SpeechSynthesizer for CommandSpeech {
    fn stop(&self) -> Result<(), CapabilityError> {
        match self.current.lock().take() {
            Some(child) => reap(child),
            None => Ok(()),
        }
    }

    fn speak(&self, utterance: Utterance) -> Result<(), CapabilityError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(embed_volume(&utterance).as_bytes()) {
                tracing::debug!("Speech program closed stdin: {}", e);
            }
        }

        tracing::debug!("Speaking {} chars", utterance.text.chars().count());
        let previous = self.current.lock().replace(child);
        if let Some(previous) = previous {
            if let Err(e) = reap(previous) {
                tracing::debug!("Could not stop previous speech: {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn utterance(text: &str) -> Utterance {
        Utterance {
            text: text.to_string(),
            pitch: 0.8,
            volume: 0.8,
            post_delay: Duration::from_millis(200),
        }
    }

    #[test]
    fn test_embed_volume() {
        assert_eq!(embed_volume(&utterance("hi")), "[[volm 0.80]] hi");
    }

    #[test]
    fn test_stop_kills_running_speech() {
        let speech = CommandSpeech::new("sh").with_args(["-c", "sleep 5"]);
        speech.speak(utterance("hello")).unwrap();
        assert!(speech.is_speaking());

        speech.stop().unwrap();
        assert!(!speech.is_speaking());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_new_utterance_reaps_previous() {
        let speech = CommandSpeech::new("sh").with_args(["-c", "sleep 5"]);
        speech.speak(utterance("first")).unwrap();
        let first = speech.current_pid().unwrap();

        speech.speak(utterance("second")).unwrap();
        assert_ne!(speech.current_pid(), Some(first));
        // A reaped process leaves no /proc entry, not even a zombie
        assert!(!std::path::Path::new(&format!("/proc/{}", first)).exists());

        speech.stop().unwrap();
        assert!(!speech.is_speaking());
    }

    #[test]
    fn test_missing_program() {
        let speech = CommandSpeech::new("/nonexistent/say");
        assert!(matches!(
            speech.speak(utterance("hi")),
            Err(CapabilityError::Io(_))
        ));
        speech.stop().unwrap();
    }
}
