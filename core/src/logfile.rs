use crate::models::{Sample, Session};

/// Parser én linje `tid avlesning`.
/// Feil antall felt eller ikke-endelige tall => None (linjen hoppes over).
pub fn parse_line(line: &str) -> Option<Sample> {
    let mut fields = line.split_whitespace();
    let t = fields.next()?.parse::<f64>().ok()?;
    let reading = fields.next()?.parse::<f64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    if !t.is_finite() || !reading.is_finite() {
        return None;
    }
    Some(Sample { t, reading })
}

/// Kutt ved første 0.0-avlesning; sentinel og alt etter forkastes.
pub fn truncate_at_sentinel(samples: &[Sample]) -> Vec<Sample> {
    samples
        .iter()
        .copied()
        .take_while(|s| !s.is_sentinel())
        .collect()
}

/// Leser hele loggteksten til en Session.
pub fn parse_session(text: &str) -> Session {
    let mut session = Session::default();

    for (line_no, line) in text.lines().enumerate() {
        match parse_line(line) {
            Some(s) if s.is_sentinel() => {
                session.sentinel_line = Some(line_no);
                break;
            }
            Some(s) => session.samples.push(s),
            None => session.skipped_lines += 1,
        }
    }

    log::debug!(
        "parse_session: {} samples, {} linjer hoppet over, sentinel={:?}",
        session.samples.len(),
        session.skipped_lines,
        session.sentinel_line
    );
    session
}
