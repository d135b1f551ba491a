use std::fmt;

use lazy_regex::{regex, regex_captures};

use crate::region::Region;

/// A `GameName#TagLine` account, optionally pinned to a region by the
/// person who registered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
    pub region_hint: Option<Region>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiotIdError {
    #[error("empty account field")]
    Empty,
    #[error("{0:?} is not a Riot ID or op.gg profile link")]
    InvalidFormat(String),
}

impl RiotId {
    /// Parses a registration cell: `Name#Tag`, `Name #Tag (euwest)` or an
    /// op.gg summoner URL.
    pub fn parse(input: &str) -> Result<RiotId, RiotIdError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RiotIdError::Empty);
        }
        let (game_name, tag_line, hint) = if input.contains("op.gg/") {
            parse_opgg_url(input).ok_or_else(|| RiotIdError::InvalidFormat(input.to_string()))?
        } else {
            parse_riot_id(input)
        };
        if game_name.is_empty() || tag_line.is_empty() {
            return Err(RiotIdError::InvalidFormat(input.to_string()));
        }

        let region_hint = match hint {
            Some(hint) => match hint.parse::<Region>() {
                Ok(region) => Some(region),
                Err(e) => {
                    debug!("ignoring region hint for {}#{}: {}", game_name, tag_line, e);
                    None
                }
            },
            None => None,
        };
        Ok(RiotId { game_name, tag_line, region_hint })
    }

    pub fn search_order(&self) -> Vec<Region> {
        Region::search_order(self.region_hint, &self.tag_line)
    }

    pub fn profile_url(&self, region: Region) -> String {
        format!(
            "https://op.gg/lol/summoners/{}/{}-{}",
            region.slug(),
            urlencoding::encode(&self.game_name),
            urlencoding::encode(&self.tag_line)
        )
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

fn parse_riot_id(input: &str) -> (String, String, Option<String>) {
    let (rest, hint) = match regex_captures!(r"^(.*?)\s*\(([^)]+)\)\s*$", input) {
        Some((_, rest, hint)) => (rest, Some(hint.trim().to_lowercase())),
        None => (input, None),
    };
    match rest.split_once('#') {
        Some((name, tag)) => (name.trim().to_string(), tag.trim().to_string(), hint),
        None => (rest.trim().to_string(), String::new(), hint),
    }
}

fn parse_opgg_url(url: &str) -> Option<(String, String, Option<String>)> {
    let captures = regex!(r"op\.gg/lol/summoners/([a-z]+)/([^/?#]+)-([^/?#]+)").captures(url)?;
    let decode = |s: &str| {
        let s = s.replace('+', " ");
        urlencoding::decode(&s).map(|decoded| decoded.into_owned()).unwrap_or(s)
    };
    Some((decode(&captures[2]), decode(&captures[3]), Some(captures[1].to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_riot_id() {
        let id = RiotId::parse("  Faker#KR1 ").unwrap();
        assert_eq!(id.game_name, "Faker");
        assert_eq!(id.tag_line, "KR1");
        assert_eq!(id.region_hint, None);
        assert_eq!(id.to_string(), "Faker#KR1");
    }

    #[test]
    fn test_spaced_tag_and_hint() {
        let id = RiotId::parse("Spoon #loh (euwest)").unwrap();
        assert_eq!(id.game_name, "Spoon");
        assert_eq!(id.tag_line, "loh");
        assert_eq!(id.region_hint, Some(Region::Euw));
        assert_eq!(id.search_order()[0], Region::Euw);
    }

    #[test]
    fn test_unknown_hint_is_dropped() {
        let id = RiotId::parse("Someone#OCE1 (oce)").unwrap();
        assert_eq!(id.region_hint, None);
    }

    #[test]
    fn test_opgg_url() {
        let id = RiotId::parse("https://op.gg/lol/summoners/euw/Some%20Player-EUW?queue=solo").unwrap();
        assert_eq!(id.game_name, "Some Player");
        assert_eq!(id.tag_line, "EUW");
        assert_eq!(id.region_hint, Some(Region::Euw));

        let id = RiotId::parse("op.gg/lol/summoners/kr/Hide+on+bush-KR1").unwrap();
        assert_eq!(id.game_name, "Hide on bush");
        assert_eq!(id.region_hint, Some(Region::Kr));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(RiotId::parse("   "), Err(RiotIdError::Empty));
        assert!(matches!(RiotId::parse("NoTagHere"), Err(RiotIdError::InvalidFormat(_))));
        assert!(matches!(RiotId::parse("Name#"), Err(RiotIdError::InvalidFormat(_))));
        assert!(matches!(
            RiotId::parse("https://op.gg/lol/champions"),
            Err(RiotIdError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_profile_url() {
        let id = RiotId::parse("Some Player#EUW").unwrap();
        assert_eq!(id.profile_url(Region::Euw), "https://op.gg/lol/summoners/euw/Some%20Player-EUW");
    }
}
