use crate::domain::table::ListingTable;
use crate::report::{days_posted_histogram, price_histogram};
use crate::templates::{card, desktop_layout, histogram_card};
use maud::{html, Markup};

pub fn report_page(title: &str, table: &ListingTable) -> Markup {
    let by_price = price_histogram(table, None);
    let by_days = days_posted_histogram(table);

    desktop_layout(
        title,
        html! {
            main {
                p { strong { (table.len()) } " listings" }
                (histogram_card(&by_price))
                (histogram_card(&by_days))
                (listings_card(table))
            }
        },
    )
}

fn listings_card(table: &ListingTable) -> Markup {
    card(
        "Listings",
        html! {
            table {
                thead {
                    tr {
                        th { "#" }
                        th { "Address" }
                        th { "Beds" }
                        th { "Price" }
                        th { "Qualifier" }
                        th { "Type" }
                        th { "Posted" }
                        th { "Days" }
                        th { "Location" }
                    }
                }
                tbody {
                    @for (i, row) in table.iter() {
                        tr {
                            td { (i) }
                            td { (row.address) }
                            td { (row.bedrooms) }
                            td { (row.price) }
                            td { (row.price_qualifier.as_deref().unwrap_or("")) }
                            td { (row.property_type) }
                            td { (row.sort_date_str) }
                            td { (row.days_since_post) }
                            td { (row.searched_location) }
                        }
                    }
                }
            }
        },
    )
}
