use strsim::levenshtein;

// Short names get almost no slack; long ones may drift a little further.
fn edit_budget(name: &str) -> usize {
    name.chars().count() / 4 + 1
}

/// The single closest name in scope, if any is close enough to be worth
/// offering. Ties resolve alphabetically so diagnostics stay stable
/// across runs.
pub fn closest(name: &str, candidates: impl IntoIterator<Item = String>) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let budget = edit_budget(name);

    candidates
        .into_iter()
        .filter(|candidate| !candidate.is_empty() && candidate != name)
        .map(|candidate| (levenshtein(name, &candidate), candidate))
        .filter(|(distance, _)| *distance <= budget)
        .min_by(|(da, a), (db, b)| da.cmp(db).then(a.cmp(b)))
        .map(|(_, candidate)| candidate)
}

/// Tip text for an unknown variable, function or parameter name.
pub fn did_you_mean(name: &str, candidates: impl IntoIterator<Item = String>) -> Option<String> {
    closest(name, candidates).map(|candidate| format!("did you mean `{}`?", candidate))
}
