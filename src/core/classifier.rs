use crate::core::{CatalogDocument, ClassifiedItem, Flag, Item};
use crate::utils::error::Result;
use std::collections::HashSet;

/// Batters, then toppings, then fillings. Duplicates are kept.
pub fn flatten_ingredients(item: &Item) -> Vec<String> {
    item.batters
        .iter()
        .chain(&item.toppings)
        .chain(&item.fillings)
        .cloned()
        .collect()
}

/// Red when every restricted name occurs in `ingredients`. An empty
/// restricted set is always red.
pub fn compute_flag(restricted: &HashSet<&str>, ingredients: &[String]) -> Flag {
    let present: HashSet<&str> = ingredients.iter().map(String::as_str).collect();
    if restricted.is_subset(&present) {
        Flag::Red
    } else {
        Flag::Green
    }
}

pub fn classify_item(item: Item, restricted: &HashSet<&str>) -> ClassifiedItem {
    let ingredients = flatten_ingredients(&item);
    let flag = compute_flag(restricted, &ingredients);

    ClassifiedItem {
        id: item.id,
        item_type: item.item_type,
        flag,
        ingredients,
    }
}

/// Classifies every item in document order. Nothing is returned unless all
/// items decode.
pub fn classify(document: &CatalogDocument, restricted: &[String]) -> Result<Vec<ClassifiedItem>> {
    let items = document.items()?;
    let restricted: HashSet<&str> = restricted.iter().map(String::as_str).collect();

    let classified: Vec<ClassifiedItem> = items
        .into_iter()
        .map(|item| classify_item(item, &restricted))
        .collect();

    tracing::debug!(
        "Classified {} items ({} red)",
        classified.len(),
        classified.iter().filter(|c| c.flag == Flag::Red).count()
    );
    Ok(classified)
}
