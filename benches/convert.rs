//! Benchmarks for history page conversion.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use eac2json::dom::parse_html;
use eac2json::history::build_ledger;
use eac2json::{Options, convert};

/// A history page with `n` blocks of one of each entry-producing action.
fn sample_page(n: usize) -> String {
    let label_row = |values: &[&str]| -> String {
        let cells: String = values
            .iter()
            .map(|v| format!("<td><label>{v}</label></td>"))
            .collect();
        format!("<tr>{cells}</tr>")
    };
    let details = |rows: &str| -> String {
        format!(
            "<tr><td><div><div><table><tbody><tr><td>More details</td></tr></tbody></table>\
             <table><tbody>{rows}</tbody></table></div></div></td></tr>"
        )
    };
    let lots = "<tr><td><b>Award ID</b></td><td><b>Shares</b></td><td><b>Price</b></td></tr>\
                <tr><td>R1</td><td>10</td><td>$100.00</td></tr>\
                <tr><td>R2</td><td>20</td><td>$110.00</td></tr>";
    let single = "<tr><td><b>Award ID</b></td><td><b>Shares</b></td></tr>\
                  <tr><td>R1</td><td>10</td></tr>";
    let panel = "<tr><td>Award ID<b>R1</b></td><td>Shares Released<b>100</b></td></tr>";

    let mut rows = label_row(&["Date", "Description", "Action", "Symbol", "Quantity"]);
    for i in 0..n {
        let date = format!("01/{:02}/2020", i % 28 + 1);
        for (action, body) in [
            ("Lapse", panel),
            ("Deposit", single),
            ("Forced Quick Sell", single),
            ("Exer and Hold", lots),
            ("Sale", lots),
            ("Journal", single),
        ] {
            rows.push_str(&label_row(&[date.as_str(), action, action, "GOOG", "10"]));
            rows.push_str(&details(body));
        }
        rows.push_str(&label_row(&[date.as_str(), "Forced Disbursement", "Forced Disbursement", "GOOG", "1"]));
    }

    format!(
        "<!DOCTYPE html><html><body><a name=\"History\"><table><tbody>\
         <tr><td>Transaction History</td></tr>\
         <tr><td><table><tbody>{rows}</tbody></table></td></tr>\
         </tbody></table></a></body></html>"
    )
}

fn bench_convert(c: &mut Criterion) {
    let html = sample_page(500);
    c.bench_function("convert", |b| {
        b.iter(|| convert(&html, &Options::default()).unwrap());
    });
}

fn bench_parse(c: &mut Criterion) {
    let html = sample_page(500);
    c.bench_function("parse_html", |b| {
        b.iter(|| parse_html(&html));
    });
}

fn bench_build_ledger(c: &mut Criterion) {
    let dom = parse_html(&sample_page(500));
    let options = Options::default();
    c.bench_function("build_ledger", |b| {
        b.iter(|| build_ledger(&dom, &options).unwrap());
    });
}

criterion_group!(benches, bench_convert, bench_parse, bench_build_ledger);
criterion_main!(benches);
