//! The GTP command vocabulary used by the referee.

use crate::Color;

/// A GTP command, rendered to its wire text by [`std::fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GtpCommand {
    /// `name`
    #[display("name")]
    Name,
    /// `version`
    #[display("version")]
    Version,
    /// `boardsize n`
    #[display("boardsize {}", _0)]
    Boardsize(u32),
    /// `komi value`
    #[display("komi {}", _0)]
    Komi(String),
    /// `clear_board`
    #[display("clear_board")]
    ClearBoard,
    /// `showboard`
    #[display("showboard")]
    ShowBoard,
    /// `genmove B` / `genmove W`
    #[display("genmove {}", _0.token())]
    GenMove(Color),
    /// `play B move` / `play W move`
    #[display("play {} {}", _0.token(), _1)]
    Play(Color, String),
    /// `final_score`
    #[display("final_score")]
    FinalScore,
    /// `quit`
    #[display("quit")]
    Quit,
}
