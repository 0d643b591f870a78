//! Page rendering.
//!
//! Handlers build a [`ListView`] or [`EditView`] and hand it to a
//! [`ViewRenderer`]. Item text arrives already escaped by the store and is
//! written into the page verbatim.

/// Client-side handler attached to interactive elements.
pub const CLICK_HANDLER: &str = "func1();";

/// Data for the list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Every item, in display order.
    pub todos: Vec<String>,
    /// Handler attached to links and buttons.
    pub click_handler: &'static str,
}

impl ListView {
    /// Creates a list view over `todos`.
    #[must_use]
    pub fn new(todos: Vec<String>) -> Self {
        Self {
            todos,
            click_handler: CLICK_HANDLER,
        }
    }
}

/// Data for the edit page of a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    /// Position of the item being edited.
    pub index: usize,
    /// Current text of the item.
    pub todo: String,
    /// Handler attached to links and buttons.
    pub click_handler: &'static str,
}

impl EditView {
    /// Creates an edit view for the item at `index`.
    #[must_use]
    pub fn new(index: usize, todo: String) -> Self {
        Self {
            index,
            todo,
            click_handler: CLICK_HANDLER,
        }
    }
}

/// Turns views into HTML documents.
pub trait ViewRenderer: Send + Sync {
    /// Renders the list page.
    fn render_list(&self, view: &ListView) -> String;

    /// Renders the edit page.
    fn render_edit(&self, view: &EditView) -> String;
}

/// Built-in renderer producing plain HTML pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

const PAGE_HEAD: &str = "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>My todolist</title>\n</head>\n<body>\n";
const PAGE_TAIL: &str = "</body>\n</html>\n";

impl ViewRenderer for HtmlRenderer {
    fn render_list(&self, view: &ListView) -> String {
        let mut html = String::from(PAGE_HEAD);
        html.push_str("<h1>My todolist</h1>\n<ul>\n");

        for (index, todo) in view.todos.iter().enumerate() {
            html.push_str(&format!(
                "<li><a href=\"/todo/delete/{index}\" onclick=\"{handler}\">&#10008;</a> \
                 <a href=\"/todo/{index}\" onclick=\"{handler}\">&#9998;</a> {todo}</li>\n",
                handler = view.click_handler,
            ));
        }

        html.push_str("</ul>\n");
        html.push_str(&format!(
            "<form action=\"/todo/add/\" method=\"post\">\n\
             <p><label for=\"newtodo\">What should I do?</label>\n\
             <input type=\"text\" name=\"newtodo\" id=\"newtodo\" autofocus />\n\
             <input type=\"submit\" value=\"Add\" onclick=\"{}\" /></p>\n</form>\n",
            view.click_handler,
        ));
        html.push_str(PAGE_TAIL);
        html
    }

    fn render_edit(&self, view: &EditView) -> String {
        let mut html = String::from(PAGE_HEAD);
        html.push_str("<h1>Edit item</h1>\n");
        html.push_str(&format!(
            "<form action=\"/todo/edit/{index}\" method=\"post\">\n\
             <input type=\"hidden\" name=\"_method\" value=\"PUT\" />\n\
             <p><label for=\"editTodo\">Edit item {index}</label>\n\
             <input type=\"text\" name=\"editTodo\" id=\"editTodo\" value=\"{todo}\" autofocus />\n\
             <input type=\"submit\" value=\"Save\" onclick=\"{handler}\" /></p>\n</form>\n\
             <p><a href=\"/todo\" onclick=\"{handler}\">Back to the list</a></p>\n",
            index = view.index,
            todo = view.todo,
            handler = view.click_handler,
        ));
        html.push_str(PAGE_TAIL);
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_renders_rows_in_order() {
        let view = ListView::new(vec!["first".to_string(), "second".to_string()]);
        let html = HtmlRenderer.render_list(&view);

        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert!(html.contains("href=\"/todo/delete/0\""));
        assert!(html.contains("href=\"/todo/1\""));
        assert!(html.contains("action=\"/todo/add/\""));
        assert!(html.contains("name=\"newtodo\""));
        assert!(html.contains("onclick=\"func1();\""));
    }

    #[test]
    fn test_list_empty() {
        let html = HtmlRenderer.render_list(&ListView::new(Vec::new()));
        assert!(!html.contains("<li>"));
        assert!(html.contains("<ul>\n</ul>"));
    }

    #[test]
    fn test_edit_carries_override_field() {
        let view = EditView::new(3, "Walk &amp; talk".to_string());
        let html = HtmlRenderer.render_edit(&view);

        assert!(html.contains("action=\"/todo/edit/3\""));
        assert!(html.contains("name=\"_method\" value=\"PUT\""));
        assert!(html.contains("name=\"editTodo\""));
        assert!(html.contains("value=\"Walk &amp; talk\""));
        assert_eq!(view.click_handler, CLICK_HANDLER);
    }

    #[test]
    fn test_stored_text_is_not_re_escaped() {
        let view = ListView::new(vec!["&lt;script&gt;".to_string()]);
        let html = HtmlRenderer.render_list(&view);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("&amp;lt;"));
    }
}
