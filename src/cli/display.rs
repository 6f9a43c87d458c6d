//! Display utilities for the timerbell CLI.

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Prints the available clips, one per line.
    pub fn show_clips(clips: &[String]) {
        for clip in clips {
            println!("{}", clip);
        }
    }

    /// Announces that the alarm started ringing.
    pub fn show_ring_started(clip: &str, seconds: u32) {
        println!("* アラームを開始しました");
        println!("  クリップ: {}", clip);
        println!("  再生時間: {}秒", seconds);
    }

    /// Announces that the alarm finished or was dismissed.
    pub fn show_ring_finished() {
        println!("[] アラームを終了しました");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}
