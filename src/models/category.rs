use super::TransactionType;

/// Color used for categories that are missing from the registry.
pub(crate) const DEFAULT_COLOR: &str = "#8b5cf6";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: TransactionType,
    pub color: &'static str,
    pub icon: &'static str,
}

const fn category(
    id: &'static str,
    name: &'static str,
    kind: TransactionType,
    color: &'static str,
    icon: &'static str,
) -> Category {
    Category {
        id,
        name,
        kind,
        color,
        icon,
    }
}

static CATEGORIES: [Category; 15] = [
    // Income
    category("1", "Salary", TransactionType::Income, "#22c55e", "Banknote"),
    category("2", "Freelance", TransactionType::Income, "#10b981", "Laptop"),
    category("3", "Investment", TransactionType::Income, "#059669", "TrendingUp"),
    category("4", "Business", TransactionType::Income, "#047857", "Building"),
    category("5", "Other Income", TransactionType::Income, "#065f46", "Plus"),
    // Expense
    category("6", "Food & Dining", TransactionType::Expense, "#ef4444", "Utensils"),
    category("7", "Transportation", TransactionType::Expense, "#dc2626", "Car"),
    category("8", "Shopping", TransactionType::Expense, "#b91c1c", "ShoppingBag"),
    category("9", "Entertainment", TransactionType::Expense, "#991b1b", "Music"),
    category("10", "Bills & Utilities", TransactionType::Expense, "#7f1d1d", "Receipt"),
    category("11", "Healthcare", TransactionType::Expense, "#f97316", "Heart"),
    category("12", "Education", TransactionType::Expense, "#ea580c", "BookOpen"),
    category("13", "Travel", TransactionType::Expense, "#c2410c", "Plane"),
    category("14", "Rent/Mortgage", TransactionType::Expense, "#9a3412", "Home"),
    category("15", "Other Expenses", TransactionType::Expense, "#7c2d12", "Minus"),
];

impl Category {
    pub(crate) fn all() -> &'static [Category] {
        &CATEGORIES
    }

    /// Exact-name lookup. Names are the matching key for transactions and budgets.
    pub(crate) fn find_by_name(name: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.name == name)
    }

    /// Case-insensitive lookup, for resolving names typed on the command line.
    pub(crate) fn find_by_name_ignore_case(name: &str) -> Option<&'static Category> {
        let lower = name.to_lowercase();
        CATEGORIES.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Categories offered for a given transaction type, in registry order.
    pub(crate) fn for_type(kind: TransactionType) -> impl Iterator<Item = &'static Category> {
        CATEGORIES.iter().filter(move |c| c.kind == kind)
    }

    pub(crate) fn color_for(name: &str) -> &'static str {
        Self::find_by_name(name)
            .map(|c| c.color)
            .unwrap_or(DEFAULT_COLOR)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
