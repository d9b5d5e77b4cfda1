use common::PlanAnalysis;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub records: Vec<PlanAnalysis>,
}

/// Side-by-side table of the headline numbers for each analyzed plan.
#[function_component(MetricsTable)]
pub fn metrics_table(props: &Props) -> Html {
    html! {
        <div class="overflow-x-auto">
            <table class="table table-zebra table-sm">
                <thead>
                    <tr>
                        <th>{"Product"}</th>
                        <th>{"Coverage"}</th>
                        <th>{"Term"}</th>
                        <th>{"Annual Premium"}</th>
                        <th>{"Payment Years"}</th>
                        <th>{"Total Premium"}</th>
                        <th>{"Payback"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.records.iter().map(|record| html! {
                        <tr>
                            <td class="font-semibold">{&record.product_name}</td>
                            <td class="font-mono">{format_amount(record.coverage_amount)}</td>
                            <td>{record.coverage_term.clone().unwrap_or_else(|| "--".to_string())}</td>
                            <td class="font-mono">{format_amount(record.annual_premium)}</td>
                            <td>{format_years(record.payment_years)}</td>
                            <td class="font-mono">{format_total_premium(record)}</td>
                            <td>{format_payback(record.payback_year)}</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}

fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(amount) => group_digits(amount),
        None => "--".to_string(),
    }
}

fn format_total_premium(record: &PlanAnalysis) -> String {
    if record.annual_premium.is_none() {
        return "--".to_string();
    }
    group_digits(record.total_premium())
}

fn format_years(value: Option<u32>) -> String {
    match value {
        Some(years) => years.to_string(),
        None => "--".to_string(),
    }
}

fn format_payback(value: Option<u32>) -> String {
    match value {
        Some(year) => format!("Year {year}"),
        None => "--".to_string(),
    }
}

/// Render an amount with thousands separators, dropping the fraction.
fn group_digits(value: f64) -> String {
    let negative = value < 0.0;
    let digits = (value.abs().round() as u64).to_string();
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_digits_inserts_thousands_separators() {
        assert_eq!(group_digits(950.0), "950");
        assert_eq!(group_digits(1234.0), "1,234");
        assert_eq!(group_digits(1234567.0), "1,234,567");
        assert_eq!(group_digits(-1234.0), "-1,234");
    }

    #[test]
    fn missing_values_render_as_dashes() {
        assert_eq!(format_amount(None), "--");
        assert_eq!(format_years(None), "--");
        assert_eq!(format_payback(Some(4)), "Year 4");
    }
}
