//! Finding the transaction history section.

use super::layout::Layout;
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::{Error, Result};

/// Find the anchor that opens the history section: the first element in
/// document order with the layout's anchor tag and marker attribute.
pub fn locate(dom: &ArenaDom, layout: &Layout) -> Result<ArenaNodeId> {
    let (attr, value) = layout.anchor_attr;
    dom.find(|dom, id| dom.is_tag(id, layout.anchor_tag) && dom.get_attr(id, attr) == Some(value))
        .ok_or(Error::MissingHistory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_finds_first_marked_anchor() {
        let dom = parse_html(
            r#"<a name="Top">top</a>
            <div><p><a href="/x">link</a><a name="History" id="first">h</a></p></div>
            <a name="History" id="second">h</a>"#,
        );

        let found = locate(&dom, &Layout::SCHWAB_EAC).unwrap();
        assert_eq!(dom.get_attr(found, "id"), Some("first"));
    }

    #[test]
    fn test_attribute_on_other_tag_is_ignored() {
        let dom = parse_html(r#"<div name="History"></div>"#);

        assert!(matches!(
            locate(&dom, &Layout::SCHWAB_EAC),
            Err(Error::MissingHistory)
        ));
    }
}
