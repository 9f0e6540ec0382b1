mod common;

use common::{CannedConverter, LossyConverter};
use mdx_core::Transcoder;
use pretty_assertions::assert_eq;

fn transcode(html: &str) -> String {
    Transcoder::new(LossyConverter).transcode(html)
}

#[test]
fn blockquote_breaks_become_quoted_lines() {
    let md = transcode("<blockquote>Line one<br>Line two<br>Line three</blockquote>");
    assert_eq!(md, "> Line one\n> Line two\n> Line three");
}

#[test]
fn breaks_outside_blockquotes_are_not_marked() {
    let md = transcode("<p>a<br>b</p>");
    assert!(!md.contains("BLOCKQUOTE"), "unexpected marker in {md:?}");
}

#[test]
fn entities_inside_pre_stay_literal() {
    let md = transcode("<p>a &amp; b</p><pre>&lt;div&gt;</pre>");
    assert_eq!(md, "a &amp; b\n\n```\n&lt;div&gt;\n```");
}

#[test]
fn iframe_survives_byte_identical() {
    let iframe = r#"<iframe src="https://example.com/x"></iframe>"#;
    let md = transcode(&format!("<p>Watch this</p>{iframe}<p>Done</p>"));
    assert!(md.contains(iframe), "iframe lost in {md:?}");
    assert!(md.starts_with("Watch this"));
}

#[test]
fn ordered_list_keeps_its_markup() {
    let list = "<ol start=\"3\">\n<li>three</li>\n<li>four</li>\n</ol>";
    let md = transcode(&format!("<p>Steps</p>{list}"));
    assert!(md.contains(list));
}

#[test]
fn span_with_entity_is_restored_in_full() {
    let md = transcode(r#"<p><span style="color:red">R&amp;D</span> team</p>"#);
    assert_eq!(md, r#"<span style="color:red">R&amp;D</span> team"#);
}

#[test]
fn span_wrapping_an_embed_is_restored_in_full() {
    let html = r#"<p><span class="video"><iframe src="https://v.example/1"></iframe></span></p>"#;
    let md = transcode(html);
    assert_eq!(
        md,
        r#"<span class="video"><iframe src="https://v.example/1"></iframe></span>"#
    );
}

#[test]
fn transcoding_twice_gives_the_same_markdown() {
    let html = concat!(
        "<p>Intro &amp; more</p>",
        "<blockquote>q1<br>q2</blockquote>",
        "<ol><li>x</li></ol>",
        r#"<iframe src="https://example.com/x"></iframe>"#,
        "<pre>&lt;b&gt;</pre>",
    );
    let transcoder = Transcoder::new(LossyConverter);
    assert_eq!(transcoder.transcode(html), transcoder.transcode(html));
}

#[test]
fn split_fence_language_is_joined() {
    let transcoder = Transcoder::new(CannedConverter("```\n[js]\nconsole.log(1);\n```\n"));
    assert_eq!(transcoder.transcode("<pre></pre>"), "```js\nconsole.log(1);\n```");
}

#[test]
fn non_breaking_spaces_are_folded() {
    assert_eq!(transcode("<p>a\u{a0}b</p>"), "a b");
}

#[test]
fn unresolvable_token_is_left_literal() {
    let transcoder = Transcoder::new(CannedConverter("see __SPAN_PLACEHOLDER_4__"));
    assert_eq!(
        transcoder.transcode("<span>only one</span>"),
        "see __SPAN_PLACEHOLDER_4__"
    );
}

#[test]
fn dropped_token_drops_the_markup_without_failing() {
    let transcoder = Transcoder::new(CannedConverter("nothing left"));
    assert_eq!(transcoder.transcode("<span>gone</span>"), "nothing left");
}
