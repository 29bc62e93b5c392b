//! Built-in handlers.

use crate::color::normalise_color;
use crate::escape::{escape_entities, escape_uri_scheme, strip_quotes};
use crate::handler::{Condition, Handler, Render, RenderContext};
use bt_types::{QuoteType, DEFAULT_ATTR};

const LIST_CLOSED_BY: &[&str] = &["/ul", "/ol", "/list", "*", "li"];

fn heading(level: u8) -> (String, Handler) {
    let name = format!("h{level}");
    let handler = Handler::new()
        .with_tags(&[name.as_str()])
        .with_bbcode(format!("[{name}]{{0}}[/{name}]"))
        .with_html(format!("<{name}>{{0}}</{name}>"));
    (name, handler)
}

/// Handler for a bbcode tag mapping to a plain html element.
fn simple(name: &str, tags: &[&str], html: &str) -> Handler {
    Handler::new()
        .with_tags(tags)
        .with_bbcode(format!("[{name}]{{0}}[/{name}]"))
        .with_html(format!("<{html}>{{0}}</{html}>"))
}

fn list(name: &str, html: &str) -> Handler {
    Handler::new()
        .block()
        .with_break_start(true)
        .skip_last_line_break()
        .with_html(format!("<{html}>{{0}}</{html}>"))
        .with_bbcode(format!("[{name}]{{0}}[/{name}]"))
}

fn alignment(align: &str) -> Handler {
    let values = ["", "-webkit-", "-moz-", "-khtml-"]
        .iter()
        .map(|x| format!("{x}{align}"))
        .collect::<Vec<_>>();
    let values = values.iter().map(String::as_str).collect::<Vec<_>>();
    Handler::new()
        .with_condition(Condition::style("text-align", &values))
        .block()
        .allows_empty()
        .with_bbcode(format!("[{align}]{{0}}[/{align}]"))
        .with_html(format!("<div style=\"text-align: {align}\">{{0}}</div>"))
}

fn direction(dir: &str) -> Handler {
    Handler::new()
        .with_condition(Condition::style("direction", &[dir]))
        .block()
        .with_bbcode(format!("[{dir}]{{0}}[/{dir}]"))
        .with_html(format!("<div style=\"direction: {dir}\">{{0}}</div>"))
}

/// Attribute `name`, falling back to css property `property`.
fn attr_or_style<'a>(ctx: &RenderContext<'a>, name: &str, property: &str) -> Option<&'a str> {
    ctx.attr(name)
        .filter(|x| !x.is_empty())
        .or_else(|| ctx.attributes().style(property))
        .filter(|x| !x.is_empty())
}

fn font_to_bbcode(ctx: &RenderContext<'_>) -> String {
    match ctx.attributes().style("font-family") {
        Some(v) if !v.is_empty() => format!("[font={}]{}[/font]", strip_quotes(v), ctx.content),
        _ => ctx.content.clone(),
    }
}

fn size_to_bbcode(ctx: &RenderContext<'_>) -> String {
    match attr_or_style(ctx, "size", "font-size") {
        Some(v) => format!("[size={v}]{}[/size]", ctx.content),
        None => ctx.content.clone(),
    }
}

fn color_to_bbcode(ctx: &RenderContext<'_>) -> String {
    match attr_or_style(ctx, "color", "color") {
        Some(v) => format!("[color={}]{}[/color]", normalise_color(v), ctx.content),
        None => ctx.content.clone(),
    }
}

fn color_to_html(ctx: &RenderContext<'_>) -> String {
    match ctx.attr(DEFAULT_ATTR).filter(|x| !x.is_empty()) {
        Some(v) => format!(
            "<span style=\"color: {}\">{}</span>",
            escape_entities(normalise_color(v).as_str(), true),
            ctx.content
        ),
        None => ctx.content.clone(),
    }
}

fn img_to_bbcode(ctx: &RenderContext<'_>) -> String {
    let size = match (
        attr_or_style(ctx, "width", "width"),
        attr_or_style(ctx, "height", "height"),
    ) {
        (Some(width), Some(height)) => format!("={width}x{height}"),
        _ => String::new(),
    };
    format!("[img{size}]{}[/img]", ctx.attr("src").unwrap_or_default())
}

fn img_to_html(ctx: &RenderContext<'_>) -> String {
    let mut width = ctx.attr("width");
    let mut height = ctx.attr("height");

    // `[img=340x240]`
    if let Some(v) = ctx.attr(DEFAULT_ATTR) {
        let mut parts = v.split(['x', 'X']);
        width = parts.next();
        height = match (parts.next(), parts.next()) {
            (Some(h), None) => Some(h),
            _ => width,
        };
    }

    let mut attribs = String::new();
    if let Some(v) = width {
        attribs.push_str(format!(" width=\"{}\"", escape_entities(v, true)).as_str());
    }
    if let Some(v) = height {
        attribs.push_str(format!(" height=\"{}\"", escape_entities(v, true)).as_str());
    }

    format!("<img{attribs} src=\"{}\" />", escape_uri_scheme(&ctx.content))
}

fn url_to_bbcode(ctx: &RenderContext<'_>) -> String {
    let href = ctx.attr("href").unwrap_or_default();
    match href.strip_prefix("mailto:") {
        Some(v) => format!("[email={v}]{}[/email]", ctx.content),
        None => format!("[url={href}]{}[/url]", ctx.content),
    }
}

fn url_to_html(ctx: &RenderContext<'_>) -> String {
    let href = match ctx.attr(DEFAULT_ATTR).filter(|x| !x.is_empty()) {
        Some(v) => escape_entities(v, true),
        None => ctx.content.clone(),
    };
    format!("<a href=\"{}\">{}</a>", escape_uri_scheme(&href), ctx.content)
}

fn email_to_html(ctx: &RenderContext<'_>) -> String {
    let address = match ctx.attr(DEFAULT_ATTR).filter(|x| !x.is_empty()) {
        Some(v) => escape_entities(v, true),
        None => ctx.content.clone(),
    };
    format!("<a href=\"mailto:{address}\">{}</a>", ctx.content)
}

fn quote_to_bbcode(ctx: &RenderContext<'_>) -> String {
    if let Some(author) = ctx.attr("data-author").filter(|x| !x.is_empty()) {
        return format!("[quote={author}]{}[/quote]", ctx.content);
    }

    let children = &ctx.token.children;
    let cite = children
        .iter()
        .rposition(|x| x.is_open() && x.name.eq_ignore_ascii_case("cite"));
    let author = cite.and_then(|pos| children[pos].children.first().map(|x| (pos, x.value.trim())));

    match author {
        Some((pos, author)) => {
            let rest = children
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != pos)
                .map(|(_, x)| x.clone())
                .collect::<Vec<_>>();
            let content = ctx.render_tokens(&rest);
            if author.is_empty() {
                format!("[quote]{content}[/quote]")
            } else {
                format!("[quote={author}]{content}[/quote]")
            }
        }
        None => format!("[quote]{}[/quote]", ctx.content),
    }
}

fn quote_to_html(ctx: &RenderContext<'_>) -> String {
    match ctx.attr(DEFAULT_ATTR).filter(|x| !x.is_empty()) {
        Some(v) => format!(
            "<blockquote><cite>{}</cite>{}</blockquote>",
            escape_entities(v, true),
            ctx.content
        ),
        None => format!("<blockquote>{}</blockquote>", ctx.content),
    }
}

fn youtube_to_bbcode(ctx: &RenderContext<'_>) -> String {
    match ctx.attr("data-youtube-id").filter(|x| !x.is_empty()) {
        Some(v) => format!("[youtube]{v}[/youtube]"),
        None => ctx.content.clone(),
    }
}

/// All built-in handlers in registration order.
///
/// The order decides which handler converts an html element matched by more than one.
pub fn preset_handlers() -> Vec<(String, Handler)> {
    let mut handlers = (1..=6).map(heading).collect::<Vec<_>>();

    let rest = [
        (
            "b",
            simple("b", &["b", "strong"], "strong").with_condition(Condition::style(
                "font-weight",
                &["bold", "bolder", "401", "700", "800", "900"],
            )),
        ),
        (
            "i",
            simple("i", &["i", "em"], "em")
                .with_condition(Condition::style("font-style", &["italic", "oblique"])),
        ),
        (
            "u",
            simple("u", &["u"], "u")
                .with_condition(Condition::style("text-decoration", &["underline"])),
        ),
        (
            "s",
            simple("s", &["s", "strike"], "s")
                .with_condition(Condition::style("text-decoration", &["line-through"])),
        ),
        ("sub", simple("sub", &["sub"], "sub")),
        ("sup", simple("sup", &["sup"], "sup")),
        (
            "font",
            Handler::new()
                .with_condition(Condition::has_style("font-family"))
                .with_quote_type(QuoteType::Never)
                .with_bbcode(Render::function(font_to_bbcode))
                .with_html("<span style=\"font-family: {default}\">{0}</span>"),
        ),
        (
            "size",
            Handler::new()
                .with_condition(Condition::has_style("font-size"))
                .with_bbcode(Render::function(size_to_bbcode))
                .with_html("<span style=\"font-size: {default}\">{!0}</span>"),
        ),
        (
            "color",
            Handler::new()
                .with_condition(Condition::has_style("color"))
                .with_quote_type(QuoteType::Never)
                .with_bbcode(Render::function(color_to_bbcode))
                .with_html(Render::function(color_to_html)),
        ),
        ("ul", list("ul", "ul").with_tags(&["ul"])),
        ("list", {
            let mut handler = list("list", "ul");
            handler.bbcode = None;
            handler
        }),
        ("ol", list("ol", "ol").with_tags(&["ol"])),
        (
            "li",
            simple("li", &["li"], "li").with_closed_by(LIST_CLOSED_BY),
        ),
        (
            "*",
            Handler::new()
                .block()
                .with_closed_by(LIST_CLOSED_BY)
                .exclude_closing()
                .with_html("<li>{0}</li>"),
        ),
        (
            "table",
            simple("table", &["table"], "table")
                .block()
                .with_html_inline(true)
                .skip_last_line_break(),
        ),
        (
            "tr",
            simple("tr", &["tr"], "tr").block().skip_last_line_break(),
        ),
        ("th", simple("th", &["th"], "th").block().allows_empty()),
        ("td", simple("td", &["td"], "td").block().allows_empty()),
        (
            "hr",
            Handler::new()
                .with_tags(&["hr"])
                .allows_empty()
                .self_closing()
                .block()
                .with_bbcode("[hr]{0}")
                .with_html("<hr />"),
        ),
        (
            "img",
            Handler::new()
                .allows_empty()
                .with_condition(Condition::tag("img").with_attribute("src"))
                .with_allowed_children(&["#"])
                .with_quote_type(QuoteType::Never)
                .with_bbcode(Render::function(img_to_bbcode))
                .with_html(Render::function(img_to_html)),
        ),
        (
            "url",
            Handler::new()
                .allows_empty()
                .with_condition(Condition::tag("a").with_attribute("href"))
                .with_quote_type(QuoteType::Never)
                .with_bbcode(Render::function(url_to_bbcode))
                .with_html(Render::function(url_to_html)),
        ),
        (
            "email",
            Handler::new()
                .with_quote_type(QuoteType::Never)
                .with_html(Render::function(email_to_html)),
        ),
        (
            "quote",
            Handler::new()
                .with_tags(&["blockquote"])
                .block()
                .with_quote_type(QuoteType::Never)
                .with_bbcode(Render::function(quote_to_bbcode))
                .with_html(Render::function(quote_to_html)),
        ),
        (
            "code",
            simple("code", &["code"], "code")
                .block()
                .with_allowed_children(&["#", "#newline"]),
        ),
        ("left", alignment("left")),
        ("center", alignment("center")),
        ("right", alignment("right")),
        ("justify", alignment("justify")),
        (
            "youtube",
            Handler::new()
                .allows_empty()
                .with_condition(Condition::tag("iframe").with_attribute("data-youtube-id"))
                .with_bbcode(Render::function(youtube_to_bbcode))
                .with_html(
                    "<iframe width=\"560\" height=\"315\" \
                     src=\"https://www.youtube-nocookie.com/embed/{0}?wmode=opaque\" \
                     data-youtube-id=\"{0}\" allowfullscreen></iframe>",
                ),
        ),
        ("rtl", direction("rtl")),
        ("ltr", direction("ltr")),
    ];

    handlers.extend(rest.into_iter().map(|(k, v)| (k.to_owned(), v)));
    handlers
}
