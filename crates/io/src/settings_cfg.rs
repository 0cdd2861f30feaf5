// Settings persistence (es_settings.cfg)
//
// Flat XML document, one empty element per setting:
//   <bool name="EnableSounds" value="true" />
//   <int name="ScreenSaverTime" value="300000" />
// Element order carries no meaning; duplicate names apply in encounter
// order, last one wins.

use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use emustation_config::Settings;

use crate::paths;

pub const SETTINGS_FILENAME: &str = "es_settings.cfg";

// These names are set through command-line arguments, not the in-program
// settings menu, and are never written to es_settings.cfg. A stale file
// must not override them on the next launch.
const DONT_SAVE: &[&str] = &[
    "Debug",
    "DebugGrid",
    "DebugText",
    "ParseGamelistOnly",
    "ShowExit",
    "Windowed",
    "VSync",
    "HideConsole",
    "ConfigDirectory",
    "IgnoreGamelist",
];

/// Path of the settings file for this store.
pub fn settings_path(settings: &Settings) -> PathBuf {
    paths::config_dir(settings).join(SETTINGS_FILENAME)
}

/// Write the store to its default location, overwriting any existing file.
pub fn save(settings: &Settings) -> Result<(), String> {
    write_file(settings, &settings_path(settings))
}

/// Write the store to `path`.
///
/// Names on the don't-save list are omitted regardless of kind. The store
/// itself is never modified, even when the write fails.
pub fn write_file(settings: &Settings, path: &Path) -> Result<(), String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_group(&mut writer, "bool", settings.bools())?;
    write_group(&mut writer, "int", settings.ints())?;
    write_group(&mut writer, "float", settings.floats())?;
    write_group(&mut writer, "string", settings.strings())?;

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    fs::write(path, xml).map_err(|e| e.to_string())
}

/// Write one kind's map as a run of empty elements, sorted by name so the
/// file is stable across runs.
fn write_group<V: Display>(
    writer: &mut Writer<Vec<u8>>,
    kind: &str,
    map: &HashMap<String, V>,
) -> Result<(), String> {
    let mut names: Vec<&String> = map.keys().collect();
    names.sort();

    for name in names {
        if DONT_SAVE.contains(&name.as_str()) {
            continue;
        }

        let mut elem = BytesStart::new(kind);
        elem.push_attribute(("name", name.as_str()));
        elem.push_attribute(("value", map[name].to_string().as_str()));
        writer
            .write_event(Event::Empty(elem))
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Load the default-location file into the store.
pub fn load(settings: &mut Settings) -> bool {
    let path = settings_path(settings);
    read_file(settings, &path)
}

/// Load `path` into the store, overwriting whatever is currently set for
/// each name found (defaults included).
///
/// Returns false when the file is missing or fails to parse; the store is
/// left untouched in both cases. A document with zero settings elements is
/// still a successful load.
pub fn read_file(settings: &mut Settings, path: &Path) -> bool {
    if !path.exists() {
        return false;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::error!("Could not read settings file {}: {}", path.display(), e);
            return false;
        }
    };

    // Parse the whole document before touching the store, so a corrupt
    // file never leaves it half-updated
    let parsed = match parse_document(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("Could not parse settings file {}: {}", path.display(), e);
            return false;
        }
    };

    for setting in parsed {
        match setting {
            ParsedSetting::Bool(name, value) => settings.set_bool(name, value),
            ParsedSetting::Int(name, value) => settings.set_int(name, value),
            ParsedSetting::Float(name, value) => settings.set_float(name, value),
            ParsedSetting::Str(name, value) => settings.set_string(name, value),
        }
    }

    true
}

enum ParsedSetting {
    Bool(String, bool),
    Int(String, i32),
    Float(String, f32),
    Str(String, String),
}

fn parse_document(xml: &str) -> Result<Vec<ParsedSetting>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                let mut name = None;
                let mut value = None;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => name = Some(attr_text(&attr)),
                        b"value" => value = Some(attr_text(&attr)),
                        _ => {}
                    }
                }

                // Elements without a name attribute are skipped; a missing
                // value reads as the kind's zero default
                if let Some(name) = name {
                    let raw = value.unwrap_or_default();
                    match e.name().as_ref() {
                        b"bool" => parsed.push(ParsedSetting::Bool(name, parse_bool(&raw))),
                        b"int" => parsed.push(ParsedSetting::Int(name, parse_int(&raw))),
                        b"float" => parsed.push(ParsedSetting::Float(name, parse_float(&raw))),
                        b"string" => parsed.push(ParsedSetting::Str(name, raw)),
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }

    Ok(parsed)
}

fn attr_text(attr: &Attribute) -> String {
    attr.unescape_value()
        .map(|v| v.to_string())
        .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string())
}

// Malformed values coerce to each kind's zero default instead of failing
// the load. Bool accepts the usual truthy spellings by first character.
fn parse_bool(raw: &str) -> bool {
    matches!(raw.bytes().next(), Some(b'1' | b't' | b'T' | b'y' | b'Y'))
}

fn parse_int(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_float(raw: &str) -> f32 {
    raw.trim().parse().unwrap_or(0.0)
}
