/// How an action's arguments slot into the emitted console command.
#[derive(Debug, Clone, Copy)]
pub enum ArgShape {
    /// `<stem> <target>`
    TargetOnly,
    /// `<stem> <target> <extra>`, with a default when extra is blank.
    TargetThenExtra { default_extra: &'static str },
    /// `<stem> <extra> <target>`; the console wants the new value first.
    ExtraThenTarget,
    /// `<stem> <extra>`, falling back to the target when extra is blank.
    ExtraOrTarget,
    /// `<stem> <target> <literal> <extra>`; the literal fills mandatory
    /// quoted fields the console requires.
    TargetThenLiteralThenExtra { literal: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub action: &'static str,
    pub stem: &'static str,
    pub shape: ArgShape,
}

const fn target_only(action: &'static str, stem: &'static str) -> CommandSpec {
    CommandSpec {
        action,
        stem,
        shape: ArgShape::TargetOnly,
    }
}

const fn with_extra(
    action: &'static str,
    stem: &'static str,
    default_extra: &'static str,
) -> CommandSpec {
    CommandSpec {
        action,
        stem,
        shape: ArgShape::TargetThenExtra { default_extra },
    }
}

/// Every admin action the console front end offers, mapped onto the
/// worldserver command grammar. Target is a character name throughout.
pub static COMMAND_GRAMMAR: &[CommandSpec] = &[
    target_only("pinfo", "pinfo"),
    target_only("kick", "kick"),
    with_extra("ban account", "ban account", "0 Admin action"),
    with_extra("ban character", "ban character", "0 Admin action"),
    with_extra("ban ip", "ban ip", "0 Admin action"),
    target_only("unban account", "unban account"),
    target_only("unban character", "unban character"),
    with_extra("mute", "mute", "10"),
    target_only("unmute", "unmute"),
    target_only("freeze", "freeze"),
    target_only("unfreeze", "unfreeze"),
    target_only("revive", "revive"),
    target_only("repairitems", "repairitems"),
    target_only("combatstop", "combatstop"),
    target_only("unstuck", "unstuck"),
    target_only("summon", "summon"),
    // The console's teleport-by-name form; extra is the location.
    with_extra("teleport", "teleport name", ""),
    with_extra("character level", "character level", "80"),
    target_only("character rename", "character rename"),
    target_only("character customize", "character customize"),
    target_only("character changefaction", "character changefaction"),
    target_only("character changerace", "character changerace"),
    CommandSpec {
        action: "character changeaccount",
        stem: "character changeaccount",
        shape: ArgShape::ExtraThenTarget,
    },
    target_only("character reputation", "character reputation"),
    target_only("character titles", "character titles"),
    target_only("reset talents", "reset talents"),
    target_only("reset spells", "reset spells"),
    target_only("reset stats", "reset stats"),
    target_only("reset level", "reset level"),
    target_only("reset honor", "reset honor"),
    with_extra("send mail", "send mail", r#""Admin" "Message""#),
    CommandSpec {
        action: "send items",
        stem: "send items",
        shape: ArgShape::TargetThenLiteralThenExtra {
            literal: r#""Admin" "Items""#,
        },
    },
    with_extra("send money", "send money", r#""Admin" "Gold" 10000"#),
    with_extra("send message", "send message", "Hello from admin"),
    CommandSpec {
        action: "lookup player account",
        stem: "lookup player account",
        shape: ArgShape::ExtraOrTarget,
    },
    CommandSpec {
        action: "lookup player ip",
        stem: "lookup player ip",
        shape: ArgShape::ExtraOrTarget,
    },
];

/// Splits an `<action> <target> [extra...]` line into its parts. Actions
/// can be several words long, so the grammar table is consulted longest
/// name first; unknown actions take a single word. Returns `None` when no
/// target is left over.
pub fn split_action_line(input: &str) -> Option<(String, String, String)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut specs: Vec<&CommandSpec> = COMMAND_GRAMMAR.iter().collect();
    specs.sort_by_key(|s| std::cmp::Reverse(s.action.len()));
    for spec in specs {
        if let Some(rest) = input.strip_prefix(spec.action) {
            if rest.is_empty() {
                return None;
            }
            if !rest.starts_with(' ') {
                continue;
            }
            let mut parts = rest.trim_start().splitn(2, ' ');
            let target = match parts.next() {
                Some(t) if !t.is_empty() => t.to_string(),
                _ => return None,
            };
            let extra = parts.next().unwrap_or("").trim().to_string();
            return Some((spec.action.to_string(), target, extra));
        }
    }

    let mut parts = input.splitn(3, ' ');
    let action = parts.next()?.to_string();
    let target = match parts.next() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return None,
    };
    let extra = parts.next().unwrap_or("").trim().to_string();
    Some((action, target, extra))
}

/// Builds the console command for an action. Unknown actions degrade to
/// `<action> <target>` so new console verbs work without a table entry.
pub fn build_command(action: &str, target: &str, extra: &str) -> String {
    let extra = extra.trim();
    let spec = COMMAND_GRAMMAR.iter().find(|s| s.action == action);
    match spec {
        None => format!("{} {}", action, target),
        Some(spec) => match spec.shape {
            ArgShape::TargetOnly => format!("{} {}", spec.stem, target),
            ArgShape::TargetThenExtra { default_extra } => {
                let extra = if extra.is_empty() { default_extra } else { extra };
                format!("{} {} {}", spec.stem, target, extra)
            }
            ArgShape::ExtraThenTarget => format!("{} {} {}", spec.stem, extra, target),
            ArgShape::ExtraOrTarget => {
                let arg = if extra.is_empty() { target } else { extra };
                format!("{} {}", spec.stem, arg)
            }
            ArgShape::TargetThenLiteralThenExtra { literal } => {
                format!("{} {} {} {}", spec.stem, target, literal, extra)
            }
        },
    }
}
