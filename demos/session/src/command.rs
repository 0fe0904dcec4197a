//! Console command grammar.
//!
//! | Input            | Effect                                   |
//! |------------------|------------------------------------------|
//! | `+15m`, `-2h`    | advance / rewind by a delta              |
//! | `+1d6h30m`       | compound deltas                          |
//! | `set 2d`         | jump to an absolute elapsed time         |
//! | `step`           | advance by the default increment         |
//! | `small`, `-small`| small step forward / back                |
//! | `large`, `-large`| large step forward / back                |
//! | `tell`           | post the current time to chat            |
//! | `now`            | print the time and calendar              |
//! | `quit`           | leave                                    |

use et_core::TimeDelta;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Increment(TimeDelta),
    Set(TimeDelta),
    Step,
    Small { forward: bool },
    Large { forward: bool },
    Tell,
    Now,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let cmd = match line {
        "step" => Command::Step,
        "small" | "+small" => Command::Small { forward: true },
        "-small" => Command::Small { forward: false },
        "large" | "+large" => Command::Large { forward: true },
        "-large" => Command::Large { forward: false },
        "tell" => Command::Tell,
        "now" => Command::Now,
        "quit" | "exit" => Command::Quit,
        _ => {
            if let Some(rest) = line.strip_prefix("set ") {
                Command::Set(parse_delta(rest.trim())?)
            } else if let Some(rest) = line.strip_prefix('+') {
                Command::Increment(parse_delta(rest)?)
            } else if let Some(rest) = line.strip_prefix('-') {
                Command::Increment(parse_delta(rest)?.negated())
            } else {
                return Err(format!("unknown command {line:?}"));
            }
        }
    };
    Ok(cmd)
}

/// Parse `"1d6h30m"`-style text.  A bare number is minutes.
pub fn parse_delta(text: &str) -> Result<TimeDelta, String> {
    if text.is_empty() {
        return Err("empty time".to_string());
    }
    if let Ok(minutes) = text.parse::<f64>() {
        return Ok(TimeDelta::minutes(minutes));
    }

    let mut delta = TimeDelta::ZERO;
    let mut number = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }
        let value: f64 = number.parse().map_err(|_| format!("bad number before {c:?} in {text:?}"))?;
        match c {
            'd' => delta.days += value,
            'h' => delta.hours += value,
            'm' => delta.minutes += value,
            _ => return Err(format!("unknown unit {c:?} in {text:?}")),
        }
        number.clear();
    }
    if !number.is_empty() {
        return Err(format!("missing unit after {number} in {text:?}"));
    }
    Ok(delta)
}
