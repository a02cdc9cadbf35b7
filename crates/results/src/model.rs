//! Row records as served by the match-results backend.
//!
//! One struct per table payload. Every field is defaulted and decoded
//! leniently, so rows with absent, null, or mistyped fields still decode
//! and render blank instead of failing the whole payload.
//! The `resultKind`/`routenameKind`/`matchkind` fields arrive in the
//! backend's discriminated-union encoding `{"Case": "<Tag>", ...}` and
//! are decoded into real sum types; an unknown tag is preserved verbatim
//! and rendered raw rather than dropped.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scalar unions
// ---------------------------------------------------------------------------

/// Route identifier. The backend serves numbers for Db route ids and
/// free-form strings for unparsed route parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteId {
    Num(i64),
    Text(String),
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Completeness indicator; appears as a boolean in newer payloads and as
/// an integer in older ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Num(i64),
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Num(n) => write!(f, "{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tagged kinds
// ---------------------------------------------------------------------------

/// Wire form of the backend's union encoding. Extra keys (a `Fields`
/// payload on non-nullary cases) are ignored on decode.
#[derive(Serialize, Deserialize)]
struct CaseTag {
    #[serde(rename = "Case")]
    case: String,
}

/// Outcome of matching one route parameter against the Db dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultKind {
    WikidataFoundInDbData,
    WikidataNotFoundInDbData,
    RouteParameterEmpty,
    NoDbDataFoundWithRailwayGuide,
    NoDbDataFoundWithoutRailwayGuide,
    RouteIsNoPassengerTrain,
    StartStopStationsNotFound,
    RouteIsShutdown,
    RouteParameterNotParsed,
    /// Tag not in the recognized set; kept verbatim for raw display.
    Unrecognized(String),
}

impl ResultKind {
    /// Recognized tags, in select-filter order.
    pub const TAGS: [&'static str; 9] = [
        "WikidataFoundInDbData",
        "WikidataNotFoundInDbData",
        "RouteParameterEmpty",
        "NoDbDataFoundWithRailwayGuide",
        "NoDbDataFoundWithoutRailwayGuide",
        "RouteIsNoPassengerTrain",
        "StartStopStationsNotFound",
        "RouteIsShutdown",
        "RouteParameterNotParsed",
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "WikidataFoundInDbData" => Self::WikidataFoundInDbData,
            "WikidataNotFoundInDbData" => Self::WikidataNotFoundInDbData,
            "RouteParameterEmpty" => Self::RouteParameterEmpty,
            "NoDbDataFoundWithRailwayGuide" => Self::NoDbDataFoundWithRailwayGuide,
            "NoDbDataFoundWithoutRailwayGuide" => Self::NoDbDataFoundWithoutRailwayGuide,
            "RouteIsNoPassengerTrain" => Self::RouteIsNoPassengerTrain,
            "StartStopStationsNotFound" => Self::StartStopStationsNotFound,
            "RouteIsShutdown" => Self::RouteIsShutdown,
            "RouteParameterNotParsed" => Self::RouteParameterNotParsed,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::WikidataFoundInDbData => "WikidataFoundInDbData",
            Self::WikidataNotFoundInDbData => "WikidataNotFoundInDbData",
            Self::RouteParameterEmpty => "RouteParameterEmpty",
            Self::NoDbDataFoundWithRailwayGuide => "NoDbDataFoundWithRailwayGuide",
            Self::NoDbDataFoundWithoutRailwayGuide => "NoDbDataFoundWithoutRailwayGuide",
            Self::RouteIsNoPassengerTrain => "RouteIsNoPassengerTrain",
            Self::StartStopStationsNotFound => "StartStopStationsNotFound",
            Self::RouteIsShutdown => "RouteIsShutdown",
            Self::RouteParameterNotParsed => "RouteParameterNotParsed",
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for ResultKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CaseTag { case: self.tag().to_string() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResultKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = CaseTag::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag.case))
    }
}

/// How a route name was recovered from a page title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutenameKind {
    Empty,
    EmptyWithIgnored,
    SmallFormat,
    Parenthesis,
    Text,
    Unmatched,
    /// Tag not in the recognized set; kept verbatim for raw display.
    Unrecognized(String),
}

impl RoutenameKind {
    /// Recognized tags, in select-filter order.
    pub const TAGS: [&'static str; 6] = [
        "Empty",
        "EmptyWithIgnored",
        "SmallFormat",
        "Parenthesis",
        "Text",
        "Unmatched",
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Empty" => Self::Empty,
            "EmptyWithIgnored" => Self::EmptyWithIgnored,
            "SmallFormat" => Self::SmallFormat,
            "Parenthesis" => Self::Parenthesis,
            "Text" => Self::Text,
            "Unmatched" => Self::Unmatched,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Empty => "Empty",
            Self::EmptyWithIgnored => "EmptyWithIgnored",
            Self::SmallFormat => "SmallFormat",
            Self::Parenthesis => "Parenthesis",
            Self::Text => "Text",
            Self::Unmatched => "Unmatched",
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl fmt::Display for RoutenameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for RoutenameKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CaseTag { case: self.tag().to_string() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RoutenameKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = CaseTag::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag.case))
    }
}

/// How a Wk station was matched to a Db station. The tag set is owned by
/// the matching pipeline and open-ended, so the tag is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchKind(pub String);

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for MatchKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CaseTag { case: self.0.clone() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MatchKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = CaseTag::deserialize(deserializer)?;
        Ok(Self(tag.case))
    }
}

// ---------------------------------------------------------------------------
// Row records
// ---------------------------------------------------------------------------

/// Field-level tolerance: a present-but-mistyped value decodes to the
/// field default instead of failing the whole payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Top-level match outcome for one route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteResult {
    #[serde(deserialize_with = "lenient")]
    pub route: Option<RouteId>,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    /// [from-station, to-station] display names; 2 elements when present.
    #[serde(deserialize_with = "lenient")]
    pub from_to_name_matched: Vec<String>,
    /// [from-km, to-km]; empty means "no distance known".
    #[serde(deserialize_with = "lenient")]
    pub from_to_km: Vec<f64>,
    #[serde(deserialize_with = "lenient")]
    pub result_kind: Option<ResultKind>,
    #[serde(deserialize_with = "lenient")]
    pub count_wiki_stops: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub count_db_stops_found: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub count_db_stops_not_found: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub routes_in_title: Option<Flag>,
    #[serde(deserialize_with = "lenient")]
    pub is_complete_db_route: Option<Flag>,
}

/// Route parameter as parsed out of one page title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteInfo {
    #[serde(deserialize_with = "lenient")]
    pub nummer: Option<RouteId>,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub von: String,
    #[serde(deserialize_with = "lenient")]
    pub bis: String,
    #[serde(deserialize_with = "lenient")]
    pub routename_kind: Option<RoutenameKind>,
    #[serde(deserialize_with = "lenient")]
    pub searchstring: String,
}

/// A stop page known to the Wk side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiStop {
    #[serde(deserialize_with = "lenient")]
    pub title: String,
}

/// Station row extracted from a route infobox.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StationOfInfobox {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub link: String,
    /// DS100 operating-point code.
    #[serde(deserialize_with = "lenient")]
    pub shortname: String,
    #[serde(deserialize_with = "lenient")]
    pub symbols: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub distances: Vec<f64>,
}

/// Station of a Wk route table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StationOfRoute {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub kms: Vec<f64>,
}

/// Station of a Db route, from the infrastructure registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DbStationOfRoute {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub km: Option<f64>,
    #[serde(rename = "STELLE_ART", deserialize_with = "lenient")]
    pub stelle_art: String,
}

/// One Db station with the Wk station it was matched to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StationOfDbWk {
    #[serde(deserialize_with = "lenient")]
    pub dbname: String,
    #[serde(deserialize_with = "lenient")]
    pub dbkm: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub wkname: String,
    #[serde(deserialize_with = "lenient")]
    pub wkkms: Vec<f64>,
    #[serde(deserialize_with = "lenient")]
    pub matchkind: Option<MatchKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_kind_decodes_known_tag() {
        let kind: ResultKind =
            serde_json::from_str(r#"{"Case":"WikidataFoundInDbData"}"#).unwrap();
        assert_eq!(kind, ResultKind::WikidataFoundInDbData);
        assert_eq!(kind.to_string(), "WikidataFoundInDbData");
    }

    #[test]
    fn result_kind_ignores_fields_payload() {
        let kind: ResultKind =
            serde_json::from_str(r#"{"Case":"RouteIsShutdown","Fields":[4250]}"#).unwrap();
        assert_eq!(kind, ResultKind::RouteIsShutdown);
    }

    #[test]
    fn result_kind_keeps_unknown_tag_verbatim() {
        let kind: ResultKind =
            serde_json::from_str(r#"{"Case":"SomethingNew"}"#).unwrap();
        assert_eq!(kind, ResultKind::Unrecognized("SomethingNew".into()));
        assert_eq!(kind.to_string(), "SomethingNew");
    }

    #[test]
    fn result_kind_serializes_as_case_object() {
        let json = serde_json::to_string(&ResultKind::RouteParameterEmpty).unwrap();
        assert_eq!(json, r#"{"Case":"RouteParameterEmpty"}"#);
        let raw = serde_json::to_string(&ResultKind::Unrecognized("X".into())).unwrap();
        assert_eq!(raw, r#"{"Case":"X"}"#);
    }

    #[test]
    fn result_kind_tags_cover_every_variant() {
        for tag in ResultKind::TAGS {
            let kind = ResultKind::from_tag(tag);
            assert!(!matches!(kind, ResultKind::Unrecognized(_)), "{tag}");
            assert_eq!(kind.tag(), tag);
        }
    }

    #[test]
    fn routename_kind_round_trips_tags() {
        for tag in RoutenameKind::TAGS {
            let kind = RoutenameKind::from_tag(tag);
            assert!(!matches!(kind, RoutenameKind::Unrecognized(_)), "{tag}");
            assert_eq!(kind.tag(), tag);
        }
        let unknown = RoutenameKind::from_tag("Mystery");
        assert_eq!(unknown.to_string(), "Mystery");
    }

    #[test]
    fn matchkind_preserves_raw_tag() {
        let kind: MatchKind = serde_json::from_str(r#"{"Case":"EqualNames"}"#).unwrap();
        assert_eq!(kind.to_string(), "EqualNames");
        assert_eq!(serde_json::to_string(&kind).unwrap(), r#"{"Case":"EqualNames"}"#);
    }

    #[test]
    fn route_id_accepts_number_and_text() {
        let num: RouteId = serde_json::from_str("6107").unwrap();
        assert_eq!(num, RouteId::Num(6107));
        assert_eq!(num.to_string(), "6107");

        let text: RouteId = serde_json::from_str(r#""6107a""#).unwrap();
        assert_eq!(text, RouteId::Text("6107a".into()));
        assert_eq!(text.to_string(), "6107a");
    }

    #[test]
    fn flag_accepts_bool_and_number() {
        let b: Flag = serde_json::from_str("true").unwrap();
        assert_eq!(b.to_string(), "true");
        let n: Flag = serde_json::from_str("2").unwrap();
        assert_eq!(n.to_string(), "2");
    }

    #[test]
    fn route_result_decodes_full_row() {
        let json = r#"{
            "route": 6107,
            "title": "Berlin-Stettiner Eisenbahn",
            "fromToNameMatched": ["Berlin-Gesundbrunnen", "Szczecin"],
            "fromToKm": [0.0, 134.7],
            "resultKind": {"Case": "WikidataNotFoundInDbData"},
            "countWikiStops": 12,
            "countDbStopsFound": 9,
            "countDbStopsNotFound": 3,
            "routesInTitle": 1,
            "isCompleteDbRoute": false
        }"#;
        let row: RouteResult = serde_json::from_str(json).unwrap();
        assert_eq!(row.route, Some(RouteId::Num(6107)));
        assert_eq!(row.from_to_name_matched.len(), 2);
        assert_eq!(row.from_to_km, vec![0.0, 134.7]);
        assert_eq!(row.result_kind, Some(ResultKind::WikidataNotFoundInDbData));
        assert_eq!(row.count_db_stops_not_found, Some(3));
    }

    #[test]
    fn route_result_decodes_empty_object_blank() {
        let row: RouteResult = serde_json::from_str("{}").unwrap();
        assert!(row.route.is_none());
        assert!(row.title.is_empty());
        assert!(row.from_to_name_matched.is_empty());
        assert!(row.from_to_km.is_empty());
        assert!(row.result_kind.is_none());
        assert!(row.count_wiki_stops.is_none());
    }

    #[test]
    fn mistyped_fields_degrade_to_blank_not_to_an_error() {
        let json = r#"[
            {"title": "Bahnstrecke Angermünde–Schwedt", "route": 6081, "countDbStopsFound": 9},
            {"title": "Bahnstrecke Britz–Fürstenberg", "route": 6754,
             "countDbStopsFound": "nine", "fromToKm": "23.4", "resultKind": 7}
        ]"#;
        let rows: Vec<RouteResult> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].count_db_stops_found, Some(9));
        assert_eq!(rows[1].route, Some(RouteId::Num(6754)));
        assert!(rows[1].count_db_stops_found.is_none());
        assert!(rows[1].from_to_km.is_empty());
        assert!(rows[1].result_kind.is_none());
    }

    #[test]
    fn null_fields_decode_like_absent_ones() {
        let json = r#"{"title": null, "fromToKm": null, "countWikiStops": null}"#;
        let row: RouteResult = serde_json::from_str(json).unwrap();
        assert!(row.title.is_empty());
        assert!(row.from_to_km.is_empty());
        assert!(row.count_wiki_stops.is_none());
    }

    #[test]
    fn station_of_db_wk_decodes_detail_fields() {
        let json = r#"{
            "dbname": "Angermünde",
            "dbkm": 83.9,
            "wkname": "Angermünde",
            "wkkms": [83.9, 84.0],
            "matchkind": {"Case": "EqualShortNames"}
        }"#;
        let row: StationOfDbWk = serde_json::from_str(json).unwrap();
        assert_eq!(row.dbkm, Some(83.9));
        assert_eq!(row.wkkms.len(), 2);
        assert_eq!(row.matchkind.unwrap().to_string(), "EqualShortNames");
    }

    #[test]
    fn db_station_decodes_registry_field_name() {
        let json = r#"{"name": "Berlin Hbf", "km": 0.0, "STELLE_ART": "Bf"}"#;
        let row: DbStationOfRoute = serde_json::from_str(json).unwrap();
        assert_eq!(row.stelle_art, "Bf");
    }
}
