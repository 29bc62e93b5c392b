use bt_handler::{Handler, Render};
use bt_parser::{Parser, ParserOptions};
use bt_types::QuoteType;

#[test]
fn test_bbcode_to_html() {
    let parser = Parser::default();

    let cases = [
        ("[b]foo[/b]", "<strong>foo</strong>"),
        ("[i]foo[/i]", "<em>foo</em>"),
        ("[u]foo[/u]", "<u>foo</u>"),
        ("[s]foo[/s]", "<s>foo</s>"),
        ("[sub]foo[/sub]", "<sub>foo</sub>"),
        ("[sup]foo[/sup]", "<sup>foo</sup>"),
        (
            "[font=\"sans-serif\"]foo[/font]",
            "<span style=\"font-family: sans-serif\">foo</span>",
        ),
        (
            "[size=13px]foo[/size]",
            "<span style=\"font-size: 13px\">foo</span>",
        ),
        (
            "[color=rgb(0,0,0)]foo[/color]",
            "<span style=\"color: #000000\">foo</span>",
        ),
        (
            "[list][li]foo[/li][li]bar[/li][/list]",
            "<ul><li>foo</li><li>bar</li></ul>",
        ),
        (
            "[ol][li]foo[/li][li]bar[/li][/ol]",
            "<ol><li>foo</li><li>bar</li></ol>",
        ),
        (
            "[img=300x300]foo[/img]",
            "<img width=\"300\" height=\"300\" src=\"foo\" />",
        ),
        ("[url=bar]foo[/url]", "<a href=\"bar\">foo</a>"),
        ("[email=bar]foo[/email]", "<a href=\"mailto:bar\">foo</a>"),
        ("[quote]foo[/quote]", "<blockquote>foo</blockquote>"),
        (
            "[quote=bar]foo[/quote]",
            "<blockquote><cite>bar</cite>foo</blockquote>",
        ),
        ("[code]foo[/code]", "<code>foo</code>"),
        (
            "[left]foo[/left]",
            "<div style=\"text-align: left\">foo</div>",
        ),
        (
            "[center]foo[/center]",
            "<div style=\"text-align: center\">foo</div>",
        ),
        (
            "[right]foo[/right]",
            "<div style=\"text-align: right\">foo</div>",
        ),
        (
            "[justify]foo[/justify]",
            "<div style=\"text-align: justify\">foo</div>",
        ),
        (
            "[youtube]foo[/youtube]",
            "<iframe width=\"560\" height=\"315\" \
             src=\"https://www.youtube-nocookie.com/embed/foo?wmode=opaque\" \
             data-youtube-id=\"foo\" allowfullscreen></iframe>",
        ),
        ("[rtl]foo[/rtl]", "<div style=\"direction: rtl\">foo</div>"),
        ("[ltr]foo[/ltr]", "<div style=\"direction: ltr\">foo</div>"),
    ];

    for (input, expected) in cases {
        assert_eq!(parser.to_html(input, false), expected, "input: {input}");
    }
}

#[test]
fn test_custom_handlers() {
    let mut parser = Parser::default();

    parser.set_handler("lazy", Handler::new().with_html("<span>lazy: {0}</span>"));
    assert_eq!(
        parser.to_html("[lazy]foo[/lazy]", false),
        "<span>lazy: foo</span>"
    );

    parser.set_handler(
        "lozy",
        Handler::new().with_html(Render::function(|ctx| {
            format!(
                "<span data-test=\"{}\">{}</span>",
                ctx.attr("default").unwrap_or_default(),
                ctx.content
            )
        })),
    );
    assert_eq!(
        parser.to_html("[lozy=bar]foo[/lozy]", false),
        "<span data-test=\"bar\">foo</span>"
    );
    assert_eq!(
        parser.to_html("[lozy=bar test=123]foo[/lozy]", false),
        "<span data-test=\"bar\">foo</span>"
    );
}

#[test]
fn test_lazy_transformation() {
    let mut parser = Parser::default();
    assert_eq!(
        parser.to_html("[unknown]x[/unknown]", false),
        "[unknown]x[/unknown]"
    );

    // Known tag without html render.
    parser.set_handler("spoiler", Handler::new().with_bbcode("[spoiler]{0}[/spoiler]"));
    assert_eq!(
        parser.to_html("[spoiler][b]x[/b][/spoiler]", false),
        "[spoiler]<strong>x</strong>[/spoiler]"
    );

    let mut parser = Parser::new(ParserOptions {
        lazy_transformation: false,
        ..Default::default()
    });
    parser.set_handler("spoiler", Handler::new().with_bbcode("[spoiler]{0}[/spoiler]"));
    assert_eq!(
        parser.to_html("[spoiler][b]x[/b][/spoiler]", false),
        "<strong>x</strong>"
    );
    assert_eq!(parser.to_bbcode("<p>a<b>b</b></p>"), "a[b]b[/b]");
}

#[test]
fn test_escape_content() {
    let parser = Parser::default();
    assert_eq!(
        parser.to_html("[b]<script>&[/b]", false),
        "<strong>&lt;script&gt;&amp;</strong>"
    );
    assert_eq!(
        parser.to_html("[url=javascript:alert(1)]x[/url]", false),
        "<a href=\"./javascript:alert(1)\">x</a>"
    );
}

#[test]
fn test_line_breaks() {
    let parser = Parser::default();
    assert_eq!(parser.to_html("a\nb", false), "a<br />b");
    assert_eq!(parser.to_html("a\n", false), "a<br /><br />");
    assert_eq!(
        parser.to_html("[quote]a[/quote]\nb", false),
        "<blockquote>a</blockquote>b"
    );
    assert_eq!(
        parser.to_html("[quote][b]a[/b][/quote]", false),
        "<blockquote><strong>a</strong><br /></blockquote>"
    );
}

#[test]
fn test_repair() {
    let parser = Parser::default();
    assert_eq!(
        parser.to_html("[b]A[quote]B[/quote]C[/b]", false),
        "<strong>A</strong><blockquote><strong>B</strong><br /></blockquote><strong>C</strong>"
    );
    assert_eq!(
        parser.to_html("[b][i]x[/b]y[/i]", false),
        "<strong><em>x</em></strong><em>y</em>"
    );
    assert_eq!(
        parser.to_html("[list][*]a[*]b[/list]", false),
        "<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(
        parser.to_html("[code][b]x[/b][/code]", false),
        "<code>[b]x[/b]</code>"
    );
    assert_eq!(parser.to_html("[b]x", false), "[b]x");
    assert_eq!(parser.to_html("a[b][/b]", false), "a");
}

#[test]
fn test_tags_left_open() {
    let parser = Parser::default();
    assert_eq!(
        parser.to_html("[b][b]x[/b]", false),
        "<strong><strong>x</strong></strong>"
    );
    assert_eq!(
        parser.to_html("[quote][quote]a[/quote]", false),
        "<blockquote><blockquote>a</blockquote></blockquote>"
    );
    assert_eq!(
        parser.to_html("[i][b][i]x[/b]y[/i]", false),
        "<em><strong><em>x</em></strong><em>y</em></em>"
    );
    assert_eq!(parser.cleanup_bbcode("[b][b]x[/b]", false), "[b][b]x[/b][/b]");
}

#[test]
fn test_html_to_bbcode() {
    let parser = Parser::default();
    assert_eq!(
        parser.to_bbcode("<span style=\"color: rgb(0,0,0)\">foo</span>"),
        "[color=#000000]foo[/color]"
    );
    assert_eq!(parser.from_html("<strong>foo</strong>"), "[b]foo[/b]");
    assert_eq!(
        parser.to_bbcode("<blockquote><cite>bar</cite>foo</blockquote>"),
        "[quote=bar]foo[/quote]"
    );
    assert_eq!(
        parser.to_bbcode("<ul><li>a</li><li>b</li></ul>"),
        "[ul][li]a[/li][li]b[/li][/ul]"
    );
}

#[test]
fn test_cleanup() {
    let parser = Parser::default();
    assert_eq!(parser.cleanup_bbcode("[b ]foo[/b]", false), "[b]foo[/b]");
    assert_eq!(parser.cleanup_bbcode("[B]foo[/B]", false), "[b]foo[/b]");
    assert_eq!(
        parser.cleanup_bbcode("[size=\"13 px\"]a[/size][size='9']b[/size]", false),
        "[size=\"13 px\"]a[/size][size=9]b[/size]"
    );
    assert_eq!(
        parser.cleanup_bbcode("[font=\"Comic Sans\"]a[/font]", false),
        "[font=Comic Sans]a[/font]"
    );
    assert_eq!(
        parser.cleanup_bbcode("[quote]a[/quote]\nb", false),
        "[quote]a[/quote]\nb"
    );
    assert_eq!(parser.cleanup_bbcode("[unknown  ]a", false), "[unknown  ]a");
}

#[test]
fn test_cleanup_options() {
    let parser = Parser::new(ParserOptions {
        break_start_block: true,
        break_end_block: true,
        break_after_block: false,
        quote_type: QuoteType::Always,
        ..Default::default()
    });
    assert_eq!(
        parser.cleanup_bbcode("[quote=a]x[/quote]", false),
        "[quote=a]\nx\n[/quote]"
    );
    assert_eq!(
        parser.cleanup_bbcode("[size=9]x[/size]", false),
        "[size=\"9\"]x[/size]"
    );
}

#[test]
fn test_preserve_new_lines() {
    let parser = Parser::new(ParserOptions {
        break_start_block: true,
        ..Default::default()
    });
    assert_eq!(
        parser.cleanup_bbcode("[quote]\nx[/quote]", false),
        "[quote]\nx[/quote]\n"
    );
    assert_eq!(
        parser.to_html("[quote]\nx[/quote]", true),
        "<blockquote><br />x</blockquote>"
    );
    assert_eq!(
        parser.to_html("[quote]\nx[/quote]", false),
        "<blockquote>x</blockquote>"
    );
}
