/// Category assigned when no keyword matches.
pub const OTHER: &str = "Other";

/// Built-in keyword table. Order matters: earlier categories, and earlier
/// keywords within a category, take precedence when several match.
pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Groceries",
        &["tesco", "sainsbury", "asda", "aldi", "lidl", "morrisons", "waitrose", "co-op"],
    ),
    (
        "Transportation",
        &["uber", "tfl", "trainline", "national rail", "shell", "esso", "parking"],
    ),
    (
        "Dining",
        &["restaurant", "cafe", "costa", "starbucks", "pret", "deliveroo", "just eat", "mcdonald"],
    ),
    (
        "Utilities",
        &["british gas", "octopus", "thames water", "council tax", "vodafone", "bt group", "ee limited"],
    ),
    (
        "Entertainment",
        &["netflix", "spotify", "cinema", "disney", "steam", "playstation"],
    ),
    ("Shopping", &["amazon", "argos", "ebay", "john lewis", "primark", "ikea"]),
    ("Health", &["pharmacy", "boots", "dentist", "gym", "puregym"]),
    ("Housing", &["rent", "mortgage", "letting"]),
];

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: String,
}

/// Ordered keyword -> category lookup, built once and passed by reference to
/// whatever needs to categorize.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    /// Flatten a (category, keywords) table into single keyword rules, in
    /// table order then keyword order. Keywords are lowercased; a keyword that
    /// already appeared keeps its first category.
    pub fn from_table(table: &[(&str, &[&str])]) -> Self {
        let mut rules: Vec<CategoryRule> = Vec::new();
        for (category, keywords) in table {
            for kw in keywords.iter() {
                let keyword = kw.to_lowercase();
                if rules.iter().any(|r| r.keyword == keyword) {
                    log::debug!("duplicate keyword {keyword:?} for {category} ignored");
                    continue;
                }
                rules.push(CategoryRule {
                    keyword,
                    category: category.to_string(),
                });
            }
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The built-in rule set.
pub fn build_rules() -> RuleSet {
    RuleSet::from_table(DEFAULT_CATEGORIES)
}

/// First rule whose keyword occurs anywhere in the lowercased description
/// wins. Plain substring match, so "rent" also hits "Parental".
pub fn categorize<'a>(description: &str, rules: &'a RuleSet) -> &'a str {
    let desc_lower = description.to_lowercase();
    rules
        .rules
        .iter()
        .find(|r| desc_lower.contains(&r.keyword))
        .map(|r| r.category.as_str())
        .unwrap_or(OTHER)
}
