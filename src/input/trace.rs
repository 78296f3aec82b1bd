//! Line-oriented input traces for replaying recorded sessions.
//!
//! Each non-blank line is `<ms> <verb> [args...]`; `#` starts a comment. Timestamps
//! must not go backwards.
//!
//! ```text
//! 0    preview 1080 1920
//! 0    activate
//! 120  down 540 960
//! 180  up 700 970 900 0
//! 400  set continuous_focus on
//! 900  thumb content://media/1 image
//! ```

use crate::error::{Result, ViewfinderError};
use crate::focus::FocusPoint;
use crate::input::pointer::{HardwareKey, KeyPhase, PointerEvent, Position, Velocity};
use crate::modes::ModeFlag;
use crate::protocol::ControllerInput;
use crate::thumbnail::{MediaItem, MediaKind};
use crate::time::Millis;
use std::str::FromStr;

/// What a trace line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceStep {
    Input(ControllerInput),
    /// Flip a shared mode flag, as a collaborator would
    SetFlag { flag: ModeFlag, value: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimedInput {
    pub at: Millis,
    pub step: TraceStep,
}

pub fn parse_trace(source: &str) -> Result<Vec<TimedInput>> {
    let mut steps = Vec::new();
    let mut last_at = 0;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        let mut args = Args {
            line: line_no,
            words: &mut words,
        };
        let at: Millis = args.next("timestamp")?;
        if at < last_at {
            return Err(ViewfinderError::trace(
                line_no,
                format!("timestamp {at} goes backwards from {last_at}"),
            ));
        }
        last_at = at;

        let verb: String = args.next("verb")?;
        let step = parse_step(&verb, &mut args, at)?;
        args.finish()?;
        steps.push(TimedInput { at, step });
    }

    Ok(steps)
}

fn parse_step(verb: &str, args: &mut Args<'_, '_>, at: Millis) -> Result<TraceStep> {
    let input = match verb {
        "activate" => ControllerInput::Activate,
        "deactivate" => ControllerInput::Deactivate,
        "down" | "move" => {
            let position = Position::new(args.next("x")?, args.next("y")?);
            let pointers = args.optional("pointer count")?.unwrap_or(1);
            if verb == "down" {
                ControllerInput::Pointer(PointerEvent::down(position, pointers, at))
            } else {
                ControllerInput::Pointer(PointerEvent::moved(position, pointers, at))
            }
        }
        "up" => {
            let position = Position::new(args.next("x")?, args.next("y")?);
            let velocity = match args.optional::<f32>("velocity x")? {
                Some(vx) => Velocity::new(vx, args.next("velocity y")?),
                None => Velocity::default(),
            };
            ControllerInput::Pointer(PointerEvent::up(position, at, velocity))
        }
        "cancel" => ControllerInput::Pointer(PointerEvent::cancel(at)),
        "pinch" => ControllerInput::Pinch {
            factor: args.next("scale factor")?,
        },
        "angle" => ControllerInput::OrientationSample {
            angle: args.next("angle")?,
        },
        "tilt" => ControllerInput::DeviceTilt {
            x_angle: args.next("x angle")?,
            z_angle: args.next("z angle")?,
        },
        "key" => {
            let key = match args.word("key")? {
                "volume-up" => HardwareKey::VolumeUp,
                "volume-down" => HardwareKey::VolumeDown,
                other => return Err(args.error(format!("unknown key '{other}'"))),
            };
            let phase = match args.word("key phase")? {
                "down" => KeyPhase::Down,
                "up" => KeyPhase::Up,
                other => return Err(args.error(format!("unknown key phase '{other}'"))),
            };
            ControllerInput::Key { key, phase }
        }
        "preview" => ControllerInput::PreviewResized {
            width: args.next("width")?,
            height: args.next("height")?,
        },
        "zoom-bounds" => ControllerInput::ZoomBoundsChanged {
            min: args.next("min ratio")?,
            max: args.next("max ratio")?,
        },
        "zoom-ratio" => {
            let ratio = match args.word("ratio")? {
                "none" => None,
                value => Some(args.parse_word(value, "ratio")?),
            };
            ControllerInput::ZoomRatioReported { ratio }
        }
        "focus" => ControllerInput::FocusAt {
            point: FocusPoint::new(args.next("x")?, args.next("y")?),
            auto_cancel: args.optional("auto cancel")?.unwrap_or(0),
        },
        "mode" => ControllerInput::SelectMode(args.next("mode index")?),
        "thumb" => {
            let uri = args.word("uri")?.to_string();
            let kind = match args.word("media kind")? {
                "image" => MediaKind::Image,
                "video" => MediaKind::Video,
                "other" => MediaKind::Other,
                other => return Err(args.error(format!("unknown media kind '{other}'"))),
            };
            ControllerInput::ShowThumbnail(Some(MediaItem::new(uri, kind)))
        }
        "thumb-none" => ControllerInput::ShowThumbnail(None),
        "set" => {
            let name = args.word("flag")?;
            let flag = ModeFlag::parse(name)
                .ok_or_else(|| args.error(format!("unknown flag '{name}'")))?;
            let value = match args.word("flag value")? {
                "on" | "true" => true,
                "off" | "false" => false,
                other => {
                    return Err(args.error(format!("flag value must be on/off, got '{other}'")));
                }
            };
            return Ok(TraceStep::SetFlag { flag, value });
        }
        other => return Err(args.error(format!("unknown verb '{other}'"))),
    };

    Ok(TraceStep::Input(input))
}

/// Cut a `#` comment that starts the line or follows whitespace, so URIs with fragments
/// survive.
fn strip_comment(raw: &str) -> &str {
    let mut previous = None;
    for (at, ch) in raw.char_indices() {
        if ch == '#' && previous.map_or(true, char::is_whitespace) {
            return &raw[..at];
        }
        previous = Some(ch);
    }
    raw
}

/// Word cursor over one trace line.
struct Args<'a, 'w> {
    line: usize,
    words: &'w mut std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a, '_> {
    fn error(&self, message: impl Into<String>) -> ViewfinderError {
        ViewfinderError::trace(self.line, message)
    }

    fn word(&mut self, what: &str) -> Result<&'a str> {
        self.words
            .next()
            .ok_or_else(|| self.error(format!("missing {what}")))
    }

    fn parse_word<T: FromStr>(&self, word: &str, what: &str) -> Result<T> {
        word.parse()
            .map_err(|_| self.error(format!("invalid {what} '{word}'")))
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let word = self.word(what)?;
        self.parse_word(word, what)
    }

    fn optional<T: FromStr>(&mut self, what: &str) -> Result<Option<T>> {
        match self.words.next() {
            Some(word) => self.parse_word(word, what).map(Some),
            None => Ok(None),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self.words.next() {
            Some(extra) => Err(self.error(format!("unexpected argument '{extra}'"))),
            None => Ok(()),
        }
    }
}
