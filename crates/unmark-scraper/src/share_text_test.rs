use super::*;

// -----------------------------------------------------------------------
// extract_url: full URLs
// -----------------------------------------------------------------------

#[test]
fn returns_input_unchanged_when_it_is_already_a_url() {
    assert_eq!(
        extract_url("http://example.com"),
        Some("http://example.com".to_string())
    );
    assert_eq!(
        extract_url("https://example.com/path?x=1"),
        Some("https://example.com/path?x=1".to_string())
    );
}

#[test]
fn extracts_video_share_link() {
    let text = "3.56 复制打开抖音，看看【某某的作品】今天的晚霞 # 日落 https://v.douyin.com/C6WTi3djsno/ kcN:/ 02/08 S@l.Ch";
    assert_eq!(
        extract_url(text),
        Some("https://v.douyin.com/C6WTi3djsno/".to_string())
    );
}

#[test]
fn extracts_note_share_link() {
    let text = "72 【春日穿搭分享】 😆 http://xhslink.com/m/470umOpU7Ug 复制本条信息，打开【小红书】App查看精彩内容！";
    assert_eq!(
        extract_url(text),
        Some("http://xhslink.com/m/470umOpU7Ug".to_string())
    );
}

#[test]
fn extracts_url_from_plain_sentence() {
    let text = "这是一个链接 https://www.douyin.com/video/123 请查看";
    assert_eq!(
        extract_url(text),
        Some("https://www.douyin.com/video/123".to_string())
    );
}

#[test]
fn chinese_commas_separate_the_url_from_surrounding_text() {
    let text = "分享链接，https://xiaohongshu.com/note/123，快来看看";
    assert_eq!(
        extract_url(text),
        Some("https://xiaohongshu.com/note/123".to_string())
    );
}

#[test]
fn ascii_commas_separate_the_url_from_surrounding_text() {
    let text = "see,https://example.com/a,b";
    assert_eq!(extract_url(text), Some("https://example.com/a".to_string()));
}

#[test]
fn strips_trailing_punctuation() {
    for (text, expected) in [
        ("链接: https://example.com/path?param=1.", "https://example.com/path?param=1"),
        ("(see https://example.com/x)", "https://example.com/x"),
        ("go to https://example.com/x!?", "https://example.com/x"),
        ("`https://example.com/x`", "https://example.com/x"),
        ("look https://example.com/x;:", "https://example.com/x"),
    ] {
        assert_eq!(extract_url(text), Some(expected.to_string()), "text: {text}");
    }
}

#[test]
fn full_width_punctuation_ends_the_url() {
    for (text, expected) in [
        ("看看https://v.douyin.com/abc/。", "https://v.douyin.com/abc/"),
        ("https://v.douyin.com/abc/。", "https://v.douyin.com/abc/"),
        ("（https://xhslink.com/m/470umOpU7Ug）", "https://xhslink.com/m/470umOpU7Ug"),
        ("【https://v.douyin.com/xyz/】复制此链接", "https://v.douyin.com/xyz/"),
        ("打开 https://v.douyin.com/q1/！", "https://v.douyin.com/q1/"),
        ("链接：https://v.douyin.com/q2/；", "https://v.douyin.com/q2/"),
    ] {
        assert_eq!(extract_url(text), Some(expected.to_string()), "text: {text}");
    }
}

#[test]
fn keeps_trailing_slash() {
    assert_eq!(
        extract_url("x https://v.douyin.com/abc/ y"),
        Some("https://v.douyin.com/abc/".to_string())
    );
}

#[test]
fn first_url_wins_when_several_are_present() {
    let text = "a https://first.example.com b https://second.example.com";
    assert_eq!(
        extract_url(text),
        Some("https://first.example.com".to_string())
    );
}

// -----------------------------------------------------------------------
// extract_url: short-code recovery
// -----------------------------------------------------------------------

#[test]
fn rebuilds_video_short_link_from_colon_slash_code() {
    let text = "复制打开抖音 iRNBEcV:/ 看看";
    assert_eq!(
        extract_url(text),
        Some("https://v.douyin.com/iRNBEcV".to_string())
    );
}

#[test]
fn rebuilds_note_short_link_from_eleven_char_code() {
    let text = "小红书笔记 470umOpU7Ug 复制本条信息";
    assert_eq!(
        extract_url(text),
        Some("https://xhslink.com/470umOpU7Ug".to_string())
    );
}

// -----------------------------------------------------------------------
// extract_url: not found
// -----------------------------------------------------------------------

#[test]
fn returns_none_for_text_without_links() {
    assert_eq!(extract_url("这里没有链接"), None);
    assert_eq!(extract_url("hello there, friend"), None);
}

#[test]
fn returns_none_for_empty_or_blank_text() {
    assert_eq!(extract_url(""), None);
    assert_eq!(extract_url("   \n"), None);
}

// -----------------------------------------------------------------------
// is_valid_url
// -----------------------------------------------------------------------

#[test]
fn accepts_http_and_https_urls() {
    assert!(is_valid_url("https://example.com"));
    assert!(is_valid_url("http://example.com"));
    assert!(is_valid_url("https://example.com/path?param=1"));
}

#[test]
fn rejects_other_schemes_and_garbage() {
    assert!(!is_valid_url("not-a-url"));
    assert!(!is_valid_url("ftp://example.com"));
    assert!(!is_valid_url(""));
}
