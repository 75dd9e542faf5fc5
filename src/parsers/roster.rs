// src/parsers/roster.rs
use lazy_static::lazy_static;
use regex::Regex;

use crate::config::RosterRules;
use crate::lookup;
use crate::models::player::PlayerRecord;

lazy_static! {
    // -[Account][Character][IP][Map][Zone][Exp][GMLev]-
    // Exactly seven non-empty bracket groups; anything else on the line
    // disqualifies it.
    static ref ROSTER_LINE: Regex = Regex::new(
        r"^-\[([^\]]+)\]\[([^\]]+)\]\[([^\]]+)\]\[([^\]]+)\]\[([^\]]+)\]\[([^\]]+)\]\[([^\]]+)\]-$"
    )
    .unwrap();
}

/// A roster line is either a player row or diagnostic chatter the server
/// mixed into the reply. Chatter is preserved so callers can count or log it.
#[derive(Debug, Clone)]
pub enum RosterLine {
    Player(PlayerRecord),
    Unrecognized(String),
}

pub fn parse_roster_line(line: &str, rules: &RosterRules) -> RosterLine {
    let caps = match ROSTER_LINE.captures(line) {
        Some(caps) => caps,
        None => return RosterLine::Unrecognized(line.to_string()),
    };

    let account = caps[1].to_string();
    let name = caps[2].to_string();
    let ip = caps[3].to_string();
    let map_id = caps[4].parse::<i64>().unwrap_or(0);
    let zone_id = caps[5].parse::<i64>().unwrap_or(0);
    let expansion_id = caps[6].parse::<i64>().unwrap_or(0);
    let gm_level = caps[7].parse::<i64>().unwrap_or(0);
    let is_bot = rules.is_bot_account(&account);

    RosterLine::Player(PlayerRecord {
        is_bot,
        map_name: lookup::map_name(map_id),
        zone_name: lookup::zone_name(zone_id),
        account,
        name,
        ip,
        map_id,
        zone_id,
        expansion_id,
        gm_level,
        level: String::new(),
        race: String::new(),
        class_name: String::new(),
        race_id: 0,
        class_id: 0,
    })
}

/// Parses a full `account onlinelist` reply. Records may be separated by
/// any run of CR or LF. Blank lines are dropped before matching; every
/// remaining line that is not a player row counts as skipped.
pub fn parse_online_list(msg: &str, rules: &RosterRules) -> (Vec<PlayerRecord>, usize) {
    let mut players = Vec::new();
    let mut skipped = 0;

    for raw in msg.split(['\r', '\n']) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_roster_line(line, rules) {
            RosterLine::Player(player) => players.push(player),
            RosterLine::Unrecognized(_) => skipped += 1,
        }
    }

    (players, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RosterRules {
        RosterRules::default()
    }

    #[test]
    fn test_parse_player_line() {
        let line = "-[acct1][Hero][1.2.3.4][0][12][2][0]-";
        match parse_roster_line(line, &rules()) {
            RosterLine::Player(p) => {
                assert_eq!(p.account, "acct1");
                assert_eq!(p.name, "Hero");
                assert_eq!(p.ip, "1.2.3.4");
                assert_eq!(p.map_id, 0);
                assert_eq!(p.zone_id, 12);
                assert_eq!(p.expansion_id, 2);
                assert_eq!(p.gm_level, 0);
                assert!(!p.is_bot);
                assert_eq!(p.map_name, "Eastern Kingdoms");
                assert_eq!(p.zone_name, "Elwynn Forest");
                assert_eq!(p.level, "");
                assert_eq!(p.race_id, 0);
            }
            RosterLine::Unrecognized(l) => panic!("line not recognized: {}", l),
        }
    }

    #[test]
    fn test_bot_account_prefix() {
        let line = "-[RNDBOT0001][Bot1][0.0.0.0][1][1][0][0]-";
        match parse_roster_line(line, &rules()) {
            RosterLine::Player(p) => {
                assert!(p.is_bot);
                assert_eq!(p.map_name, "Kalimdor");
                assert_eq!(p.zone_name, "Dun Morogh");
            }
            RosterLine::Unrecognized(l) => panic!("line not recognized: {}", l),
        }
    }

    #[test]
    fn test_bot_prefix_case_insensitive() {
        let line = "-[rndbot42][Bot2][0.0.0.0][0][1][0][0]-";
        match parse_roster_line(line, &rules()) {
            RosterLine::Player(p) => assert!(p.is_bot),
            RosterLine::Unrecognized(l) => panic!("line not recognized: {}", l),
        }
    }

    #[test]
    fn test_custom_bot_prefix_rules() {
        let custom = RosterRules {
            bot_prefix: "AI_".to_string(),
            gm_level_min: 1,
        };
        let line = "-[AI_99][Botty][0.0.0.0][0][1][0][0]-";
        match parse_roster_line(line, &custom) {
            RosterLine::Player(p) => assert!(p.is_bot),
            RosterLine::Unrecognized(l) => panic!("line not recognized: {}", l),
        }
        let rnd = "-[RNDBOT0001][Bot1][0.0.0.0][0][1][0][0]-";
        match parse_roster_line(rnd, &custom) {
            RosterLine::Player(p) => assert!(!p.is_bot),
            RosterLine::Unrecognized(l) => panic!("line not recognized: {}", l),
        }
    }

    #[test]
    fn test_numeric_garbage_becomes_zero() {
        let line = "-[acct][Hero][1.2.3.4][abc][xyz][q][w]-";
        match parse_roster_line(line, &rules()) {
            RosterLine::Player(p) => {
                assert_eq!(p.map_id, 0);
                assert_eq!(p.zone_id, 0);
                assert_eq!(p.expansion_id, 0);
                assert_eq!(p.gm_level, 0);
            }
            RosterLine::Unrecognized(l) => panic!("line not recognized: {}", l),
        }
    }

    #[test]
    fn test_unknown_ids_get_fallback_names() {
        let line = "-[acct][Hero][1.2.3.4][9999][88888][0][0]-";
        match parse_roster_line(line, &rules()) {
            RosterLine::Player(p) => {
                assert_eq!(p.map_name, "Map 9999");
                assert_eq!(p.zone_name, "Zone 88888");
            }
            RosterLine::Unrecognized(l) => panic!("line not recognized: {}", l),
        }
    }

    #[test]
    fn test_empty_bracket_group_is_unrecognized() {
        let line = "-[acct][][1.2.3.4][0][12][2][0]-";
        assert!(matches!(
            parse_roster_line(line, &rules()),
            RosterLine::Unrecognized(_)
        ));
    }

    #[test]
    fn test_wrong_group_count_is_unrecognized() {
        let line = "-[acct][Hero][1.2.3.4][0][12][2]-";
        assert!(matches!(
            parse_roster_line(line, &rules()),
            RosterLine::Unrecognized(_)
        ));
    }

    #[test]
    fn test_online_list_skips_chatter() {
        let msg = "Account list:\r\n\
                   -[acct1][Hero][1.2.3.4][0][12][2][0]-\r\n\
                   \r\n\
                   -[RNDBOT0001][Bot1][0.0.0.0][1][1][0][0]-\r\n\
                   2 accounts online\r\n";
        let (players, skipped) = parse_online_list(msg, &rules());
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Hero");
        assert_eq!(players[1].name, "Bot1");
        // Header and trailer lines, but not the blank one.
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_online_list_splits_on_bare_carriage_returns() {
        // Some cores emit CR-only line endings over SOAP.
        let msg = "-[acct1][Hero][1.2.3.4][0][12][2][0]-\r\
                   -[acct2][Gamma][4.3.2.1][1][14][2][0]-";
        let (players, skipped) = parse_online_list(msg, &rules());
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Hero");
        assert_eq!(players[1].name, "Gamma");
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_online_list_mixed_separator_runs() {
        let msg = "Account list:\r\
                   -[acct1][Hero][1.2.3.4][0][12][2][0]-\r\n\r\r\n\
                   -[RNDBOT0001][Bot1][0.0.0.0][1][1][0][0]-\n";
        let (players, skipped) = parse_online_list(msg, &rules());
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Hero");
        assert_eq!(players[1].name, "Bot1");
        // The header line, not the empty separator segments.
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_online_list_tolerates_indented_lines() {
        let msg = "  -[acct1][Hero][1.2.3.4][0][12][2][0]-  ";
        let (players, skipped) = parse_online_list(msg, &rules());
        // Trimming happens before the anchored match.
        assert_eq!(players.len(), 1);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_online_list_empty_input() {
        let (players, skipped) = parse_online_list("", &rules());
        assert!(players.is_empty());
        assert_eq!(skipped, 0);
    }
}
