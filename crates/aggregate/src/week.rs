use planboard_model::PlanningFact;

/// Display label for a week: numeric labels become `W`-prefixed and
/// zero-padded to two digits ("3" -> "W03"), everything else passes
/// through unchanged ("W01" stays "W01").
#[must_use]
pub fn display_week(week: &str) -> String {
    match week.trim().parse::<u32>() {
        Ok(n) => format!("W{n:02}"),
        Err(_) => week.trim().to_string(),
    }
}

/// Every distinct week display label observed across the facts, in
/// first-seen order.
#[must_use]
pub fn week_labels(facts: &[PlanningFact]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for fact in facts {
        let label = display_week(&fact.week);
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}
