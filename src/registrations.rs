use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::team::{PlayerSlot, TeamRegistration, MAIN_SLOTS, ROSTER_SIZE};

const TEAM_NAME: &str = "Komandas nosaukums";
const TEAM_TAG: &str = "Komandas saīsinātais nosaukums";
const TEAM_LOGO: &str = "Komandas Logo";
/// Column teams use when they uploaded the wrong logo the first time.
const TEAM_LOGO_CORRECTION: &str = "Komandas Logo (IZMANTO ŠO TIKAI TĀDOS GADĪJUMOS, JA EDITOJOT RESPONSE NEJAUŠI IELIKI NEPAREIZU BILDI PIRMAJĀ KOMANDAS LOGO JAUTĀJUMĀ!!!)";
const TEAM_DESCRIPTION: &str = "Komandas apraksts";
const FILL_ROLE: &str = "FILL";

/// Reads team registrations from a form export, CSV or JSON by extension.
pub fn read_registrations(path: &Path) -> anyhow::Result<Vec<TeamRegistration>> {
    let file = File::open(path).with_context(|| format!("opening registrations {}", path.display()))?;
    let is_json = path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    let teams = if is_json {
        serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?
    } else {
        read_form_csv(file).with_context(|| format!("parsing {}", path.display()))?
    };
    Ok(teams)
}

/// One team per form response row. Missing cells read as empty.
pub fn read_form_csv<R: Read>(reader: R) -> anyhow::Result<Vec<TeamRegistration>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, header)| (header.trim().to_string(), index))
        .collect();

    let mut teams = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |header: &str| -> String {
            columns
                .get(header)
                .and_then(|index| record.get(*index))
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        let logo = match cell(TEAM_LOGO_CORRECTION) {
            correction if !correction.is_empty() => correction,
            _ => cell(TEAM_LOGO),
        };
        let players = (1..=ROSTER_SIZE)
            .map(|i| PlayerSlot {
                discord: cell(&format!("{}. Discord profils", i)),
                tournament_account: cell(&format!("{}. Turnīra profils", i)),
                main_account: cell(&format!("{}. Main profils", i)),
                role: if i <= MAIN_SLOTS { cell(&format!("{}. Role", i)) } else { FILL_ROLE.to_string() },
            })
            .collect();

        teams.push(TeamRegistration {
            name: cell(TEAM_NAME),
            tag: cell(TEAM_TAG),
            logo,
            description: cell(TEAM_DESCRIPTION),
            players,
        });
    }
    Ok(teams)
}
