use maud::{html, Markup, DOCTYPE};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; color: #1f2937; }
header { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.15); }
main { padding: 1.5rem; }
.card { border: 1px solid #e5e7eb; border-radius: 6px; padding: 1rem; margin-bottom: 1.5rem; }
.bar { background: #524ed2; height: 0.9rem; }
table { border-collapse: collapse; font-size: 0.85rem; }
td, th { padding: 0.25rem 0.5rem; border-bottom: 1px solid #e5e7eb; text-align: left; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (STYLE) }
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { (title) }
                }
                (content)
            }
        }
    }
}
