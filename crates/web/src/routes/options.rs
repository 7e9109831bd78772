//! Select and checkbox options with their selection precomputed.

/// One `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn list<'a, I>(values: I, selected: &str) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        values
            .into_iter()
            .map(|value| Self {
                value: value.to_string(),
                selected: value == selected,
            })
            .collect()
    }
}

/// One checkbox with an optional secondary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOption {
    pub value: String,
    pub detail: String,
    pub checked: bool,
}

/// Every catalog crop as a checkbox, ticked when in `selected`.
#[must_use]
pub fn crop_options(selected: &[String]) -> Vec<CheckOption> {
    agrow_core::CROPS
        .iter()
        .map(|crop| CheckOption {
            value: crop.name.to_string(),
            detail: format!("{} · {}", crop.season, crop.season.window()),
            checked: selected.iter().any(|s| s == crop.name),
        })
        .collect()
}

/// Catalog states as select options.
#[must_use]
pub fn state_options(selected: &str) -> Vec<SelectOption> {
    SelectOption::list(agrow_core::REGIONS.iter().map(|r| r.state), selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_marks_selected() {
        let options = SelectOption::list(["Pune", "Nashik"], "Nashik");
        assert!(!options.iter().any(|o| o.value == "Pune" && o.selected));
        assert!(options.iter().any(|o| o.value == "Nashik" && o.selected));
    }

    #[test]
    fn test_crop_options_tick_selection() {
        let options = crop_options(&["Onion".to_string()]);
        assert_eq!(options.len(), agrow_core::CROPS.len());
        assert_eq!(options.iter().filter(|o| o.checked).count(), 1);
    }
}
