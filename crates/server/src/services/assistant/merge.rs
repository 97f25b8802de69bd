//! Per-section merge of a model reply into the current configuration.
//!
//! Each merge works on the JSON form of the section so unknown style keys
//! survive, then deserializes the result back into the typed section and
//! validates it. Every applied change is recorded as a changelog line.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use webify_core::site::{
    CollectionConfig, CollectionStyles, HeroAnimation, HeroConfig, HeroItem, HeroItemKind,
    NavItemKind, NavbarConfig, SectionConfig, SectionItem,
};

use super::ReconcileError;
use super::normalize::{
    coerce_like, display, field, items, kebab_to_camel, object_field, position, style_key,
    style_value, text_field,
};

/// A merged section plus what changed.
#[derive(Debug)]
pub struct Merged<T> {
    pub config: T,
    pub changes: Vec<String>,
}

/// Legacy item forms where the type is the key: `{"badge": "New"}`.
const LEGACY_HERO_KEYS: [HeroItemKind; 4] = [
    HeroItemKind::Badge,
    HeroItemKind::Heading,
    HeroItemKind::Subheading,
    HeroItemKind::Button,
];

// =============================================================================
// Hero
// =============================================================================

/// Merge a hero reply. A non-empty item list replaces the current one.
pub fn hero(current: &HeroConfig, reply: &Map<String, Value>) -> Result<Merged<HeroConfig>, ReconcileError> {
    let mut updated = to_object(current)?;
    let mut changes = Vec::new();

    if let Some(reply_items) = items(reply).filter(|list| !list.is_empty()) {
        let mut consumed = vec![false; current.items.len()];
        let mut next: Vec<Map<String, Value>> = Vec::with_capacity(reply_items.len());

        for reply_item in reply_items.iter().filter_map(Value::as_object) {
            let Some((kind, legacy_content)) = hero_kind(reply_item) else {
                let skipped = Value::Object(reply_item.clone());
                tracing::debug!(item = %skipped, "Skipping hero item without a type");
                continue;
            };

            let matched = match_hero_item(current, &mut consumed, reply_item, kind);
            let item = hero_item(matched, reply_item, kind, legacy_content, &next, &mut changes)?;
            next.push(item);
        }

        if next.is_empty() {
            return Err(ReconcileError::Shape("no usable hero items".to_owned()));
        }
        updated.insert("items".to_owned(), Value::Array(next.into_iter().map(Value::Object).collect()));
    }

    if let Some(styles) = object_field(reply, &["styles", "Styles", "Global Styles"]) {
        let mut target = take_object(&mut updated, "styles");
        for (key, value) in styles {
            if value.is_null() {
                continue;
            }
            set_style(&mut target, style_key(key), value, "global style", &mut changes);
        }
        updated.insert("styles".to_owned(), Value::Object(target));
    }

    finish(updated, changes)
}

fn hero_kind(item: &Map<String, Value>) -> Option<(HeroItemKind, Option<&str>)> {
    if let Some(kind) = text_field(item, &["type", "Type"]).and_then(|t| t.parse().ok()) {
        return Some((kind, None));
    }
    LEGACY_HERO_KEYS
        .into_iter()
        .find_map(|kind| text_field(item, &[kind.as_str()]).map(|content| (kind, Some(content))))
}

/// The current item with the reply's id, else the first unused one of `kind`.
fn match_hero_item<'c>(
    current: &'c HeroConfig,
    consumed: &mut [bool],
    reply_item: &Map<String, Value>,
    kind: HeroItemKind,
) -> Option<&'c HeroItem> {
    let by_id = text_field(reply_item, &["id"])
        .and_then(|id| current.items.iter().position(|item| item.id == id && item.kind == kind));
    let index = by_id.or_else(|| {
        current
            .items
            .iter()
            .enumerate()
            .position(|(i, item)| item.kind == kind && !consumed[i])
    })?;

    consumed[index] = true;
    current.items.get(index)
}

fn hero_item(
    matched: Option<&HeroItem>,
    reply_item: &Map<String, Value>,
    kind: HeroItemKind,
    legacy_content: Option<&str>,
    taken: &[Map<String, Value>],
    changes: &mut Vec<String>,
) -> Result<Map<String, Value>, ReconcileError> {
    let mut item = match matched {
        Some(current) => to_object(current)?,
        None => Map::new(),
    };

    let is_taken = |id: &str| taken.iter().any(|other| other.get("id").and_then(Value::as_str) == Some(id));
    let id = text_field(reply_item, &["id"])
        .filter(|id| !is_taken(id))
        .or_else(|| matched.map(|m| m.id.as_str()).filter(|id| !is_taken(id)))
        .map_or_else(
            || {
                (1..)
                    .map(|n| format!("{}{n}", kind.as_str()))
                    .find(|candidate| !is_taken(candidate))
                    .unwrap_or_default()
            },
            str::to_owned,
        );

    let content = text_field(reply_item, &["content", "Content"])
        .or(legacy_content)
        .map(str::to_owned)
        .or_else(|| matched.map(|m| m.content.clone()))
        .unwrap_or_default();

    let slot = position(reply_item)
        .filter(|p| HeroItem::SLOTS.contains(p))
        .or_else(|| matched.map(SectionItem::position))
        .unwrap_or_default();

    item.insert("id".to_owned(), Value::String(id));
    item.insert("type".to_owned(), Value::String(kind.as_str().to_owned()));
    item.insert("content".to_owned(), Value::String(content));
    item.insert("position".to_owned(), Value::String(slot.as_str().to_owned()));

    if let Some(link) = text_field(reply_item, &["link", "Link"]) {
        item.insert("link".to_owned(), Value::String(link.to_owned()));
    }
    if let Some(url) = text_field(reply_item, &["imageUrl", "Image URL"]) {
        item.insert("imageUrl".to_owned(), Value::String(url.to_owned()));
    }
    if let Some(animation) = field(reply_item, &["animation"])
        .and_then(|a| serde_json::from_value::<HeroAnimation>(a.clone()).ok())
    {
        item.insert("animation".to_owned(), serde_json::to_value(animation)?);
    }

    let label = kind.as_str();
    apply_item_styles(&mut item, reply_item, |key, old, new| {
        if matched.is_some() {
            changes.push(format!(
                "- Changed {label} {key} from {} to {}",
                display(old),
                display(Some(new))
            ));
        }
    });

    Ok(item)
}

// =============================================================================
// Navbar
// =============================================================================

/// Merge a navbar reply by matching reply items onto the current ones.
pub fn navbar(
    current: &NavbarConfig,
    reply: &Map<String, Value>,
) -> Result<Merged<NavbarConfig>, ReconcileError> {
    let mut updated = to_object(current)?;
    let mut changes = Vec::new();

    if let Some(reply_items) = items(reply).filter(|list| !list.is_empty()) {
        let mut next = Vec::with_capacity(current.items.len());

        for current_item in &current.items {
            let label = current_item.label.as_str();
            let mut item = to_object(current_item)?;

            let matching = reply_items.iter().filter_map(Value::as_object).find(|reply_item| {
                str_eq(reply_item, "id", &current_item.id)
                    || str_eq(reply_item, "label", label)
                    || str_eq(reply_item, "link", label)
                    || (current_item.kind == NavItemKind::Image && str_eq(reply_item, "image", label))
            });

            if let Some(reply_item) = matching {
                if let Some(new_label) = text_field(reply_item, &["label", "Label"]).filter(|l| *l != label) {
                    changes.push(format!("- Changed item \"{label}\" label to \"{new_label}\""));
                    item.insert("label".to_owned(), Value::String(new_label.to_owned()));
                }
                if let Some(link) = text_field(reply_item, &["link", "Link"]).filter(|l| *l != current_item.link) {
                    changes.push(format!("- Changed item \"{label}\" link to \"{link}\""));
                    item.insert("link".to_owned(), Value::String(link.to_owned()));
                }
                apply_position(&mut item, reply_item, current_item, label, &mut changes);
                apply_item_styles(&mut item, reply_item, |key, old, new| {
                    changes.push(format!(
                        "- Changed item \"{label}\" style {key} from {} to {}",
                        display(old),
                        display(Some(new))
                    ));
                });
                if current_item.kind == NavItemKind::Image
                    && let Some(url) = text_field(reply_item, &["imageUrl", "Image URL"])
                        .filter(|u| Some(*u) != current_item.image_url.as_deref())
                {
                    changes.push(format!("- Changed image \"{label}\" URL to \"{url}\""));
                    item.insert("imageUrl".to_owned(), Value::String(url.to_owned()));
                }
            }

            next.push(Value::Object(item));
        }

        updated.insert("items".to_owned(), Value::Array(next));
    }

    let mut target = take_object(&mut updated, "styles");

    if let Some(global) = object_field(reply, &["Global Styles"]) {
        for (key, value) in global {
            if value.is_null() {
                continue;
            }
            let key = if key.eq_ignore_ascii_case("backgroundcolor") {
                "backgroundColor".to_owned()
            } else {
                kebab_to_camel(key)
            };
            // Only keys the navbar already styles, plus its background.
            if key != "backgroundColor" && !target.contains_key(&key) {
                continue;
            }
            set_style(&mut target, key, value, "navbar style", &mut changes);
        }
    }

    if let Some(styles) = object_field(reply, &["styles", "Styles"]) {
        for (key, value) in styles {
            if value.is_null() {
                continue;
            }
            set_style(&mut target, style_key(key), value, "navbar style", &mut changes);
        }
    }

    updated.insert("styles".to_owned(), Value::Object(target));
    finish(updated, changes)
}

// =============================================================================
// Collection
// =============================================================================

/// Merge a collection reply by matching reply items onto the current ones.
pub fn collection(
    current: &CollectionConfig,
    reply: &Map<String, Value>,
) -> Result<Merged<CollectionConfig>, ReconcileError> {
    let mut updated = to_object(current)?;
    let mut changes = Vec::new();

    if let Some(reply_items) = items(reply).filter(|list| !list.is_empty()) {
        let mut next = Vec::with_capacity(current.items.len());

        for current_item in &current.items {
            let title = current_item.title.as_str();
            let mut item = to_object(current_item)?;

            let matching = reply_items.iter().filter_map(Value::as_object).find(|reply_item| {
                str_eq(reply_item, "id", &current_item.id)
                    || str_eq(reply_item, "title", title)
                    || str_eq(reply_item, "collection", title)
            });

            if let Some(reply_item) = matching {
                let new_title = text_field(reply_item, &["title"])
                    .filter(|t| *t != title)
                    .or_else(|| text_field(reply_item, &["collection"]).filter(|t| *t != title));
                if let Some(new_title) = new_title {
                    changes.push(format!("- Changed item \"{title}\" title to \"{new_title}\""));
                    item.insert("title".to_owned(), Value::String(new_title.to_owned()));
                }
                if let Some(link) = text_field(reply_item, &["link", "Link"]).filter(|l| *l != current_item.link) {
                    changes.push(format!("- Changed item \"{title}\" link to \"{link}\""));
                    item.insert("link".to_owned(), Value::String(link.to_owned()));
                }
                if let Some(url) = text_field(reply_item, &["imageUrl", "Image URL"])
                    .filter(|u| *u != current_item.image_url)
                {
                    changes.push(format!("- Changed item \"{title}\" image URL"));
                    item.insert("imageUrl".to_owned(), Value::String(url.to_owned()));
                }
                apply_position(&mut item, reply_item, current_item, title, &mut changes);
                apply_item_styles(&mut item, reply_item, |key, old, new| {
                    changes.push(format!(
                        "- Changed item \"{title}\" style {key} from {} to {}",
                        display(old),
                        display(Some(new))
                    ));
                });
            }

            next.push(Value::Object(item));
        }

        updated.insert("items".to_owned(), Value::Array(next));
    }

    if let Some(global) = object_field(reply, &["styles", "Global Styles"]) {
        let mut target = take_object(&mut updated, "styles");

        for (key, value) in global {
            if value.is_null() {
                continue;
            }

            if key == "sectionTitle" {
                // Stringified objects ("[object Object]") and other scalars keep the current title.
                if let Value::Object(title) = value {
                    merge_section_title(&mut target, title, &mut changes);
                }
                continue;
            }

            let key = style_key(key);
            if !target.contains_key(&key)
                && key != "backgroundColor"
                && !CollectionStyles::BACKGROUND_KEYS.contains(&key.as_str())
            {
                tracing::debug!(key = %key, "Skipping unknown collection style");
                continue;
            }

            if key == "gridColumns" {
                let Some(columns) = grid_columns(value) else {
                    continue;
                };
                if target.get(&key) != Some(&columns) {
                    changes.push(format!(
                        "- Changed global collection style gridColumns from {} to {}",
                        display(target.get(&key)),
                        display(Some(&columns))
                    ));
                    target.insert(key, columns);
                }
                continue;
            }

            set_style(&mut target, key, value, "global collection style", &mut changes);
        }

        updated.insert("styles".to_owned(), Value::Object(target));
    }

    finish(updated, changes)
}

fn merge_section_title(
    styles: &mut Map<String, Value>,
    reply_title: &Map<String, Value>,
    changes: &mut Vec<String>,
) {
    let mut title = take_object(styles, "sectionTitle");

    for (key, value) in reply_title {
        if value.is_null() {
            continue;
        }
        let Some(value) = coerce_like(title.get(key), style_value(key, value)) else {
            continue;
        };
        if title.get(key) != Some(&value) {
            changes.push(format!(
                "- Changed section title {key} from {} to {}",
                display(title.get(key)),
                display(Some(&value))
            ));
            title.insert(key.clone(), value);
        }
    }

    styles.insert("sectionTitle".to_owned(), Value::Object(title));
}

/// Column count from a number or a string with leading digits (`"4"`, `"4 columns"`).
fn grid_columns(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n.as_u64().map(Value::from),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok().map(Value::from)
        }
        _ => None,
    }
}

// =============================================================================
// Shared
// =============================================================================

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, ReconcileError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(ReconcileError::Shape("expected a JSON object".to_owned())),
    }
}

/// Remove a nested object for editing; anything else under `key` becomes empty.
fn take_object(object: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match object.remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn str_eq(object: &Map<String, Value>, key: &str, expected: &str) -> bool {
    object.get(key).and_then(Value::as_str) == Some(expected)
}

/// Slots the section does not render are ignored like unparseable ones.
fn apply_position<I: SectionItem>(
    item: &mut Map<String, Value>,
    reply_item: &Map<String, Value>,
    current: &I,
    label: &str,
    changes: &mut Vec<String>,
) {
    let new_position = position(reply_item)
        .filter(|p| I::SLOTS.contains(p))
        .filter(|p| *p != current.position());
    if let Some(new_position) = new_position {
        changes.push(format!("- Changed item \"{label}\" position to \"{new_position}\""));
        item.insert("position".to_owned(), Value::String(new_position.as_str().to_owned()));
    }
}

/// Overlay reply item styles, reporting each differing key.
fn apply_item_styles(
    item: &mut Map<String, Value>,
    reply_item: &Map<String, Value>,
    mut record: impl FnMut(&str, Option<&Value>, &Value),
) {
    let Some(reply_styles) = object_field(reply_item, &["styles", "Styles"]) else {
        return;
    };
    let mut styles = take_object(item, "styles");

    for (key, value) in reply_styles {
        if value.is_null() {
            continue;
        }
        let key = style_key(key);
        let value = style_value(&key, value);
        if styles.get(&key) != Some(&value) {
            record(&key, styles.get(&key), &value);
            styles.insert(key, value);
        }
    }

    item.insert("styles".to_owned(), Value::Object(styles));
}

/// Set one global style, coercing to the current JSON type.
fn set_style(
    styles: &mut Map<String, Value>,
    key: String,
    value: &Value,
    what: &str,
    changes: &mut Vec<String>,
) {
    let Some(value) = coerce_like(styles.get(&key), style_value(&key, value)) else {
        return;
    };
    if styles.get(&key) != Some(&value) {
        changes.push(format!(
            "- Changed {what} {key} from {} to {}",
            display(styles.get(&key)),
            display(Some(&value))
        ));
        styles.insert(key, value);
    }
}

fn finish<I, S>(
    object: Map<String, Value>,
    changes: Vec<String>,
) -> Result<Merged<SectionConfig<I, S>>, ReconcileError>
where
    I: SectionItem + DeserializeOwned,
    S: DeserializeOwned + Default,
{
    let config: SectionConfig<I, S> = serde_json::from_value(Value::Object(object))?;
    config.validate()?;
    Ok(Merged { config, changes })
}
