//! Line-based map surface for terminals
//!
//! Stands in for a graphical map: each input line is one user interaction.
//!
//! ```text
//! click <lat> <lng>     click the map background
//! select <index>        click the pin shown at <index>
//! remove <index>        press remove in that pin's popup
//! name <text>           edit form fields
//! description <text>
//! cost <number>
//! save | cancel
//! ```
//!
//! Pin indexes are resolved to ids at the moment the line is read, the same
//! way a rendered popup captures the id of the pin it belongs to.

use anyhow::{Context, Result, anyhow, bail};

use crate::domain::{GeoPoint, MarkerId};
use crate::session::{FormMsg, MapMsg, Msg};
use crate::store::MarkerState;

/// Parse one input line; blank lines and `#` comments yield `None`
pub fn parse_line(line: &str, state: &MarkerState) -> Result<Option<Msg>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let msg = match verb {
        "click" => {
            let mut parts = rest.split_whitespace();
            let lat = parse_coordinate(parts.next(), "latitude")?;
            let lng = parse_coordinate(parts.next(), "longitude")?;
            if parts.next().is_some() {
                bail!("click takes exactly two numbers");
            }
            Msg::Map(MapMsg::MapClicked(GeoPoint::new(lat, lng)))
        }
        "select" => Msg::Map(MapMsg::MarkerClicked(resolve_index(rest, state)?)),
        "remove" => Msg::Map(MapMsg::RemoveClicked(resolve_index(rest, state)?)),
        "name" => Msg::Form(FormMsg::NameChanged(rest.to_string())),
        "description" => Msg::Form(FormMsg::DescriptionChanged(rest.to_string())),
        "cost" => Msg::Form(FormMsg::CostChanged(rest.to_string())),
        "save" => Msg::Form(FormMsg::Save),
        "cancel" => Msg::Form(FormMsg::Cancel),
        other => bail!("Unknown command {other:?}"),
    };
    Ok(Some(msg))
}

fn parse_coordinate(part: Option<&str>, what: &str) -> Result<f64> {
    let part = part.ok_or_else(|| anyhow!("missing {what}"))?;
    part.parse::<f64>()
        .with_context(|| format!("invalid {what}: {part:?}"))
}

fn resolve_index(arg: &str, state: &MarkerState) -> Result<MarkerId> {
    let index: usize = arg
        .parse()
        .with_context(|| format!("invalid pin index: {arg:?}"))?;
    state
        .id_at(index)
        .ok_or_else(|| anyhow!("no pin at index {index} ({} pinned)", state.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Annotation;
    use crate::store::{Command, EditPolicy};

    fn one_pin() -> MarkerState {
        MarkerState::default()
            .apply(
                Command::Add {
                    position: GeoPoint::new(1.0, 2.0),
                    annotation: Annotation::default(),
                },
                &EditPolicy::default(),
            )
            .state
    }

    #[test]
    fn test_click() {
        let msg = parse_line("click 51.5 -0.09", &MarkerState::default()).unwrap();
        assert_eq!(
            msg,
            Some(Msg::Map(MapMsg::MapClicked(GeoPoint::new(51.5, -0.09))))
        );
        assert!(parse_line("click 51.5", &MarkerState::default()).is_err());
        assert!(parse_line("click a b", &MarkerState::default()).is_err());
        assert!(parse_line("click 1 2 3", &MarkerState::default()).is_err());
    }

    #[test]
    fn test_index_resolves_to_id() {
        let state = one_pin();
        let id = state.id_at(0).unwrap();
        assert_eq!(
            parse_line("remove 0", &state).unwrap(),
            Some(Msg::Map(MapMsg::RemoveClicked(id)))
        );
        assert!(parse_line("select 1", &state).is_err());
        assert!(parse_line("select -1", &state).is_err());
    }

    #[test]
    fn test_form_fields_keep_spaces() {
        let state = MarkerState::default();
        assert_eq!(
            parse_line("name  Tower of London ", &state).unwrap(),
            Some(Msg::Form(FormMsg::NameChanged("Tower of London".into())))
        );
        assert_eq!(
            parse_line("cost", &state).unwrap(),
            Some(Msg::Form(FormMsg::CostChanged(String::new())))
        );
        assert_eq!(parse_line("save", &state).unwrap(), Some(Msg::Form(FormMsg::Save)));
    }

    #[test]
    fn test_blank_and_comments() {
        let state = MarkerState::default();
        assert_eq!(parse_line("   ", &state).unwrap(), None);
        assert_eq!(parse_line("# planning", &state).unwrap(), None);
        assert!(parse_line("teleport", &state).is_err());
    }
}
