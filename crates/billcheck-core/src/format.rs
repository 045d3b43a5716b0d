/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// `$1,234.50` style formatting with two fraction digits.
#[derive(Debug, Clone)]
pub struct EnUsCurrencyFormatter {
    pub symbol: String,
}

impl Default for EnUsCurrencyFormatter {
    fn default() -> Self {
        Self { symbol: "$".into() }
    }
}

impl CurrencyFormatter for EnUsCurrencyFormatter {
    fn format_amount(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let cents = (amount.abs() * 100.0).round() as u64;
        let whole = (cents / 100).to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
        format!("{sign}{}{grouped}.{:02}", self.symbol, cents % 100)
    }
}
