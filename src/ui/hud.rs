use unicode_width::UnicodeWidthStr;

use dingding::{EndReason, Phase, Session};

/// Lay out three labels on one line of `width` cells: left, centered, right.
/// Labels that do not fit are dropped from the right end first.
pub fn spread(width: usize, left: &str, center: &str, right: &str) -> String {
    let (lw, cw, rw) = (left.width(), center.width(), right.width());

    if lw + cw + rw + 2 > width {
        return if lw + cw + 1 <= width {
            format!("{left} {center}")
        } else {
            left.to_string()
        };
    }

    let center_start = ((width - cw) / 2).max(lw + 1);
    let right_start = width - rw;
    let center_start = center_start.min(right_start.saturating_sub(cw + 1));

    let mut line = String::with_capacity(width);
    line.push_str(left);
    line.push_str(&" ".repeat(center_start - lw));
    line.push_str(center);
    line.push_str(&" ".repeat(right_start - center_start - cw));
    line.push_str(right);
    line
}

/// One-line hint about what is going on
pub fn status_message(session: &Session) -> String {
    match session.phase() {
        Phase::Idle => "press (space) to start the countdown".to_string(),
        Phase::Running => "ring the bell at 0.00".to_string(),
        Phase::Ended(EndReason::Hit) => format!("DING! {} points", session.score()),
        Phase::Ended(EndReason::Timeout) => "time's up, the bell stayed silent".to_string(),
    }
}

pub fn score_label(session: &Session, best: Option<u32>) -> String {
    match best {
        Some(best) => format!("Score: {}  Best: {}", session.score(), best),
        None => format!("Score: {}", session.score()),
    }
}
