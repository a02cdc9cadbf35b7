//! `railmatch url` - print formed detail page paths.
//!
//! The results host owns these pages; this command only forms the path
//! from row keys, with the same percent-encoding the table links use.

use clap::ValueEnum;

use railmatch_results::links;
use railmatch_results::RouteId;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UrlTemplate {
    StationOfDbWk,
    StationOfInfobox,
    WikitextOfStop,
    DbStationOfRoute,
    BrouterOfSol,
}

fn template_name(template: UrlTemplate) -> &'static str {
    match template {
        UrlTemplate::StationOfDbWk => "station-of-db-wk",
        UrlTemplate::StationOfInfobox => "station-of-infobox",
        UrlTemplate::WikitextOfStop => "wikitext-of-stop",
        UrlTemplate::DbStationOfRoute => "db-station-of-route",
        UrlTemplate::BrouterOfSol => "brouter-of-sol",
    }
}

/// Route keys are numeric in the common case but stay text for
/// multi-number routes like "6667/6668".
fn route_id(arg: &str) -> RouteId {
    match arg.parse::<i64>() {
        Ok(n) => RouteId::Num(n),
        Err(_) => RouteId::Text(arg.to_string()),
    }
}

fn take_args<'a, const N: usize>(
    template: UrlTemplate,
    args: &'a [String],
    names: [&str; N],
) -> Result<[&'a str; N], CliError> {
    if args.len() != N {
        return Err(CliError::args(format!(
            "{} takes {} argument{}: {}",
            template_name(template),
            N,
            if N == 1 { "" } else { "s" },
            names.join(" ")
        )));
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

pub fn cmd_url(template: UrlTemplate, args: &[String]) -> Result<(), CliError> {
    let path = match template {
        UrlTemplate::StationOfDbWk => {
            let [title, route] = take_args(template, args, ["title", "route"])?;
            links::station_of_db_wk(title, &route_id(route))
        }
        UrlTemplate::StationOfInfobox => {
            let [title] = take_args(template, args, ["title"])?;
            links::station_of_infobox(title)
        }
        UrlTemplate::WikitextOfStop => {
            let [id] = take_args(template, args, ["id"])?;
            links::wikitext_of_stop(id)
        }
        UrlTemplate::DbStationOfRoute => {
            let [route] = take_args(template, args, ["route"])?;
            links::db_station_of_route(route_id(route))
        }
        UrlTemplate::BrouterOfSol => {
            let [route, start, end] = take_args(template, args, ["route", "start", "end"])?;
            links::brouter_of_sol(route_id(route), start, end)
        }
    };
    println!("{}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arity_is_checked_per_template() {
        let err = cmd_url(UrlTemplate::StationOfDbWk, &strings(&["only-title"])).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_USAGE);
        assert!(err.message.contains("station-of-db-wk takes 2 arguments"));

        let err = cmd_url(UrlTemplate::WikitextOfStop, &strings(&[])).unwrap_err();
        assert!(err.message.contains("takes 1 argument:"));
    }

    #[test]
    fn test_route_id_prefers_numbers() {
        assert_eq!(route_id("6081"), RouteId::Num(6081));
        assert_eq!(route_id("6667/6668"), RouteId::Text("6667/6668".into()));
    }

    #[test]
    fn test_templates_accept_exact_arity() {
        cmd_url(
            UrlTemplate::StationOfDbWk,
            &strings(&["Bahnstrecke Angermünde–Schwedt", "6081"]),
        )
        .unwrap();
        cmd_url(UrlTemplate::StationOfInfobox, &strings(&["Oderbruchbahn"])).unwrap();
        cmd_url(UrlTemplate::WikitextOfStop, &strings(&["Q800313"])).unwrap();
        cmd_url(UrlTemplate::DbStationOfRoute, &strings(&["6081"])).unwrap();
        cmd_url(
            UrlTemplate::BrouterOfSol,
            &strings(&["6081", "0.0", "134.7"]),
        )
        .unwrap();
    }
}
