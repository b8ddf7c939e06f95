use crate::report::Histogram;
use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Horizontal bar per bucket, scaled to the fullest bucket.
pub fn histogram_card(hist: &Histogram) -> Markup {
    let peak = hist.buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    card(
        &hist.title,
        html! {
            @if hist.is_empty() {
                p { "No data." }
            } @else {
                table {
                    @for b in &hist.buckets {
                        tr {
                            td { (b.lower) " - " (b.upper) }
                            td style="width: 20rem" {
                                div class="bar" style={ "width: " (b.count * 100 / peak) "%" } {}
                            }
                            td { (b.count) }
                        }
                    }
                }
                @if hist.skipped > 0 {
                    p { (hist.skipped) " outside range" }
                }
            }
        },
    )
}
