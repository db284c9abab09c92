use maud::{html, DOCTYPE};

/// Renders the go-get discovery page. All values are HTML-escaped.
pub fn render(root: &str, vcs: &str, redirect_root: &str) -> String {
    let content = format!("{} {} {}", root, vcs, redirect_root);
    html! {
        (DOCTYPE)
        html {
            head {
                title { "Repository" }
                meta name="go-import" content=(content);
            }
            body {
                "Content: " (content)
            }
        }
    }
    .into_string()
}
