// file: src/parser/html.rs
// description: tolerant html reader producing a small element tree for text extraction
// reference: WHATWG tokenization rules, simplified for static pages

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

const ESCAPABLE_RAW_TEXT_ELEMENTS: &[&str] = &["title", "textarea"];

/// Elements whose content never shows up in rendered text.
const NON_RENDERED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title",
];

/// Open elements allowed on the reader stack. Deeper start tags become siblings of
/// the innermost open element so tree walks stay shallow.
pub const MAX_NESTING_DEPTH: usize = 512;

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "details", "dialog", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "tbody",
    "td", "tfoot", "th", "thead", "tr", "ul",
];

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// First descendant, in document order, matched by `selector`.
    pub fn select_first(&self, selector: &Selector) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(element) = child {
                if selector.matches(element) {
                    return Some(element);
                }
                if let Some(found) = element.select_first(selector) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn select_all<'a>(&'a self, selector: &Selector) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_matching(selector, &mut found);
        found
    }

    fn collect_matching<'a>(&'a self, selector: &Selector, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(element) = child {
                if selector.matches(element) {
                    found.push(element);
                }
                element.collect_matching(selector, found);
            }
        }
    }

    /// Rendered text with block elements on their own lines.
    pub fn inner_text(&self) -> String {
        self.inner_text_excluding(&[])
    }

    /// Like [`Element::inner_text`], leaving out any subtree matched by one of `excluded`.
    pub fn inner_text_excluding(&self, excluded: &[Selector]) -> String {
        let mut out = String::new();
        self.render_text(excluded, &mut out);
        out
    }

    fn render_text(&self, excluded: &[Selector], out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => push_collapsed(out, text),
                Node::Element(element) => {
                    if NON_RENDERED_ELEMENTS.contains(&element.tag.as_str())
                        || excluded.iter().any(|s| s.matches(element))
                    {
                        continue;
                    }
                    if element.tag == "br" {
                        out.push('\n');
                    } else if BLOCK_ELEMENTS.contains(&element.tag.as_str()) {
                        out.push('\n');
                        element.render_text(excluded, out);
                        out.push('\n');
                    } else {
                        element.render_text(excluded, out);
                    }
                }
            }
        }
    }
}

/// Collapses runs of ASCII whitespace in source text to single spaces.
fn push_collapsed(out: &mut String, text: &str) {
    let mut last_was_space = out.ends_with(' ');
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
}

/// The simple selectors needed for page cleanup: `tag`, `#id`, `.class`, `[attr=value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: String },
}

impl Selector {
    pub fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }

        if let Some(id) = selector.strip_prefix('#') {
            return Some(Self::Id(id.to_string()));
        }
        if let Some(class) = selector.strip_prefix('.') {
            return Some(Self::Class(class.to_string()));
        }
        if let Some(inner) = selector
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            let (name, value) = inner.split_once('=')?;
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            return Some(Self::Attribute {
                name: name.trim().to_ascii_lowercase(),
                value: value.to_string(),
            });
        }

        Some(Self::Tag(selector.to_ascii_lowercase()))
    }

    /// Parses a comma separated selector list, ignoring empty entries.
    pub fn parse_list(selectors: &str) -> Vec<Self> {
        selectors.split(',').filter_map(Self::parse).collect()
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Tag(tag) => element.tag == *tag,
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attribute { name, value } => element.attr(name) == Some(value.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HtmlDocument {
    root: Element,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        HtmlReader::new(html).read()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn select_first(&self, selector: &Selector) -> Option<&Element> {
        self.root.select_first(selector)
    }

    pub fn body(&self) -> Option<&Element> {
        self.root.select_first(&Selector::Tag("body".to_string()))
    }

    pub fn title(&self) -> Option<String> {
        self.root
            .select_first(&Selector::Tag("title".to_string()))
            .map(|title| {
                let mut text = String::new();
                for child in &title.children {
                    if let Node::Text(t) = child {
                        push_collapsed(&mut text, t);
                    }
                }
                text.trim().to_string()
            })
            .filter(|title| !title.is_empty())
    }
}

struct HtmlReader<'a> {
    html: &'a str,
    lower: String,
    pos: usize,
    stack: Vec<Element>,
}

impl<'a> HtmlReader<'a> {
    fn new(html: &'a str) -> Self {
        Self {
            html,
            lower: html.to_ascii_lowercase(),
            pos: 0,
            stack: vec![Element::new("#document")],
        }
    }

    fn read(mut self) -> HtmlDocument {
        while self.pos < self.html.len() {
            let rest = &self.lower[self.pos..];

            if rest.starts_with("<!--") {
                self.skip_past("-->", 4);
            } else if rest.starts_with("<![cdata[") {
                self.skip_past("]]>", 9);
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past(">", 2);
            } else if rest.starts_with("</") && starts_with_alpha(&rest[2..]) {
                self.read_end_tag();
            } else if rest.starts_with('<') && starts_with_alpha(&rest[1..]) {
                self.read_start_tag();
            } else {
                self.read_text();
            }
        }

        while self.stack.len() > 1 {
            self.close_top();
        }

        let root = self.stack.pop().unwrap_or_else(|| Element::new("#document"));
        HtmlDocument { root }
    }

    fn skip_past(&mut self, terminator: &str, offset: usize) {
        let from = (self.pos + offset).min(self.html.len());
        self.pos = match self.lower[from..].find(terminator) {
            Some(idx) => from + idx + terminator.len(),
            None => self.html.len(),
        };
    }

    fn read_text(&mut self) {
        // a lone '<' that does not open a tag is plain text
        let search_from = if self.html.as_bytes()[self.pos] == b'<' {
            self.pos + 1
        } else {
            self.pos
        };
        let end = self.lower[search_from..]
            .find('<')
            .map(|idx| search_from + idx)
            .unwrap_or(self.html.len());
        let text = decode_entities(&self.html[self.pos..end]);
        self.push_text(text);
        self.pos = end;
    }

    fn read_end_tag(&mut self) {
        let name_start = self.pos + 2;
        let name_end = self.scan_name(name_start);
        let name = self.lower[name_start..name_end].to_string();
        self.skip_past(">", name_end - self.pos);
        self.close(&name);
    }

    fn read_start_tag(&mut self) {
        let name_start = self.pos + 1;
        let name_end = self.scan_name(name_start);
        let tag = self.lower[name_start..name_end].to_string();
        self.pos = name_end;

        let (attributes, self_closing) = self.read_attributes();

        self.auto_close_for(&tag);

        let mut element = Element::new(tag.clone());
        element.attributes = attributes;

        if VOID_ELEMENTS.contains(&tag.as_str()) || self_closing {
            self.append(Node::Element(element));
            return;
        }

        let raw = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
        if raw || ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
            let closing = format!("</{}", tag);
            let end = self.lower[self.pos..]
                .find(&closing)
                .map(|idx| self.pos + idx)
                .unwrap_or(self.html.len());
            let content = &self.html[self.pos..end];
            if !content.is_empty() {
                let text = if raw {
                    content.to_string()
                } else {
                    decode_entities(content)
                };
                element.children.push(Node::Text(text));
            }
            self.append(Node::Element(element));
            self.pos = end;
            if end < self.html.len() {
                self.skip_past(">", closing.len());
            }
            return;
        }

        if self.stack.len() > MAX_NESTING_DEPTH {
            self.close_top();
        }
        self.stack.push(element);
    }

    /// Reads attributes up to and including the closing `>` of a start tag.
    fn read_attributes(&mut self) -> (Vec<(String, String)>, bool) {
        let bytes = self.html.as_bytes();
        let mut attributes = Vec::new();

        loop {
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos >= bytes.len() {
                return (attributes, false);
            }
            match bytes[self.pos] {
                b'>' => {
                    self.pos += 1;
                    return (attributes, false);
                }
                b'/' => {
                    self.pos += 1;
                    if self.pos < bytes.len() && bytes[self.pos] == b'>' {
                        self.pos += 1;
                        return (attributes, true);
                    }
                    continue;
                }
                _ => {}
            }

            let name_start = self.pos;
            while self.pos < bytes.len()
                && !bytes[self.pos].is_ascii_whitespace()
                && !matches!(bytes[self.pos], b'=' | b'>' | b'/')
            {
                self.pos += 1;
            }
            let name = self.lower[name_start..self.pos].to_string();

            while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }

            let mut value = String::new();
            if self.pos < bytes.len() && bytes[self.pos] == b'=' {
                self.pos += 1;
                while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
                    self.pos += 1;
                }
                if self.pos < bytes.len() && matches!(bytes[self.pos], b'"' | b'\'') {
                    let quote = bytes[self.pos];
                    let value_start = self.pos + 1;
                    let value_end = bytes[value_start..]
                        .iter()
                        .position(|&b| b == quote)
                        .map(|idx| value_start + idx)
                        .unwrap_or(bytes.len());
                    value = decode_entities(&self.html[value_start..value_end]);
                    self.pos = (value_end + 1).min(bytes.len());
                } else {
                    let value_start = self.pos;
                    while self.pos < bytes.len()
                        && !bytes[self.pos].is_ascii_whitespace()
                        && bytes[self.pos] != b'>'
                    {
                        self.pos += 1;
                    }
                    value = decode_entities(&self.html[value_start..self.pos]);
                }
            }

            if !name.is_empty() && !attributes.iter().any(|(key, _)| *key == name) {
                attributes.push((name, value));
            }
        }
    }

    fn scan_name(&self, from: usize) -> usize {
        let bytes = self.html.as_bytes();
        let mut end = from;
        while end < bytes.len()
            && !bytes[end].is_ascii_whitespace()
            && !matches!(bytes[end], b'>' | b'/')
        {
            end += 1;
        }
        end
    }

    /// Implied end tags for elements that cannot nest in themselves.
    fn auto_close_for(&mut self, tag: &str) {
        let closes: &[&str] = match tag {
            "p" => &["p"],
            "li" => &["li"],
            "dt" | "dd" => &["dt", "dd"],
            "tr" => &["tr", "td", "th"],
            "td" | "th" => &["td", "th"],
            "option" => &["option"],
            _ => return,
        };
        if let Some(top) = self.stack.last()
            && self.stack.len() > 1
            && closes.contains(&top.tag.as_str())
        {
            self.close_top();
        }
    }

    fn close(&mut self, tag: &str) {
        let Some(depth) = self.stack.iter().rposition(|el| el.tag == tag) else {
            return;
        };
        if depth == 0 {
            return;
        }
        while self.stack.len() > depth {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.append(Node::Element(element));
        }
    }

    fn append(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if let Some(parent) = self.stack.last_mut() {
            if let Some(Node::Text(existing)) = parent.children.last_mut() {
                existing.push_str(&text);
            } else {
                parent.children.push(Node::Text(text));
            }
        }
    }
}

fn starts_with_alpha(s: &str) -> bool {
    s.as_bytes().first().is_some_and(|b| b.is_ascii_alphabetic())
}

/// Decodes the named entities static pages commonly use, plus numeric references.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        let decoded = candidate
            .find(';')
            .filter(|&semi| semi > 1 && semi <= 10)
            .and_then(|semi| decode_entity(&candidate[1..semi]).map(|ch| (ch, semi)));

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = if let Some(hex) = numeric
            .strip_prefix('x')
            .or_else(|| numeric.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            numeric.parse::<u32>().ok()?
        };
        return char::from_u32(code);
    }

    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "mdash" => '—',
        "ndash" => '–',
        "hellip" => '…',
        "bull" => '•',
        "middot" => '·',
        "rarr" => '→',
        "larr" => '←',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "pound" => '£',
        "euro" => '€',
        _ => return None,
    };
    Some(ch)
}
