//! Static content for the markdown help overlay.
//!
//! Pure data; the host renders it however its UI presents the guide.

pub const GUIDE_INTRO: &str = "Markdown is a lightweight markup language that allows you to \
format text using simple, readable syntax. It's widely used for documentation, README files, \
and content creation because it's easy to write and converts beautifully to HTML.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideSection {
    pub title: &'static str,
    pub syntax: &'static str,
    pub description: &'static str,
}

pub fn sections() -> &'static [GuideSection] {
    &SECTIONS
}

const SECTIONS: [GuideSection; 8] = [
    GuideSection {
        title: "Headers",
        syntax: "# H1\n## H2\n### H3",
        description: "Create headers using # symbols. More # means smaller header.",
    },
    GuideSection {
        title: "Text Formatting",
        syntax: "**bold text**\n*italic text*\n~~strikethrough~~",
        description: "Format text with asterisks and tildes.",
    },
    GuideSection {
        title: "Links",
        syntax: "[Link text](https://example.com)\n[Reference link][1]\n\n[1]: https://example.com",
        description: "Create clickable links to websites or references.",
    },
    GuideSection {
        title: "Lists",
        syntax: "- Item 1\n- Item 2\n  - Nested item\n\n1. Numbered item\n2. Another item",
        description: "Create bulleted or numbered lists with nesting support.",
    },
    GuideSection {
        title: "Code",
        syntax: "`inline code`\n\n```javascript\nfunction hello() {\n  console.log(\"Hello!\");\n}\n```",
        description: "Display code inline or in blocks with syntax highlighting.",
    },
    GuideSection {
        title: "Tables",
        syntax: "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |",
        description: "Create tables with headers and aligned columns.",
    },
    GuideSection {
        title: "Math Equations",
        syntax: "Inline: $E = mc^2$\n\nBlock:\n$$\n\\int_0^1 x^2 dx = \\frac{1}{3}\n$$",
        description: "Write mathematical equations using LaTeX syntax.",
    },
    GuideSection {
        title: "Diagrams",
        syntax: "```mermaid\ngraph TD\n    A[Start] --> B[End]\n```",
        description: "Describe flowcharts, sequence and class diagrams in a fenced block \
tagged with the diagram language.",
    },
];

pub const PRO_TIPS: [&str; 6] = [
    "Use two spaces at the end of a line to create a line break",
    "Escape special characters with backslash: \\*not italic\\*",
    "Use > for blockquotes and --- for horizontal rules",
    "Math equations support full LaTeX syntax",
    "Task lists: - [x] completed task, - [ ] incomplete task",
    "Diagrams: tag a fenced code block with the configured diagram language",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickRef {
    pub label: &'static str,
    pub syntax: &'static str,
}

pub const QUICK_REFERENCE: [QuickRef; 4] = [
    QuickRef {
        label: "Emphasis",
        syntax: "*italic* **bold**",
    },
    QuickRef {
        label: "Code",
        syntax: "`code` ```block```",
    },
    QuickRef {
        label: "Math",
        syntax: "$inline$ $$block$$",
    },
    QuickRef {
        label: "Diagrams",
        syntax: "```mermaid",
    },
];
