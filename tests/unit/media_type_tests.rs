/*!
 * Tests for the editability allow-list
 */

use docedit::is_editable;
use docedit::media_type::{self, EDITABLE_MEDIA_TYPES};

#[test]
fn test_isEditable_withAllowListedTypes_shouldReturnTrue() {
    for media_type in [
        "text/plain",
        "text/html",
        "text/css",
        "text/javascript",
        "application/json",
        "application/xml",
        "text/xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ] {
        assert!(is_editable(media_type), "{} should be editable", media_type);
    }
    assert_eq!(EDITABLE_MEDIA_TYPES.len(), 8);
}

#[test]
fn test_isEditable_withOtherTypes_shouldReturnFalse() {
    for media_type in [
        "",
        "image/png",
        "application/pdf",
        "application/msword",
        "application/octet-stream",
        "text/markdown",
        "TEXT/PLAIN",
        "text/plain; charset=utf-8",
        " text/plain",
    ] {
        assert!(!is_editable(media_type), "{:?} should not be editable", media_type);
    }
}

#[test]
fn test_guessFromName_shouldOnlyMarkKnownExtensionsEditable() {
    assert!(is_editable(media_type::guess_from_name("script.js")));
    assert!(is_editable(media_type::guess_from_name("feed.xml")));
    assert!(!is_editable(media_type::guess_from_name("photo.jpeg")));
}
