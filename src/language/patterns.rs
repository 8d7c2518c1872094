//! Language pattern definitions for predicate matching and disambiguation
//!
//! Each language has three pattern tiers:
//! - Markers: the detection predicate, matches if ANY marker matches
//! - Signature: one high-specificity regex worth 2 pts during disambiguation
//! - Boosters: hand-tuned constructs worth 5-8 pts each, stacking additively
//!
//! Anchors use default regex semantics: `$` is the end of the snippet, not the
//! end of a line. Patterns that need line anchors opt in with `(?m)`.

use super::registry::{Booster, LanguageDefinition};

pub static PYTHON: LanguageDefinition = LanguageDefinition {
    name: "Python",
    aliases: &["py", "python3"],
    extension: "py",
    markers: &[
        r#"def\s+\w+\s*\([^)]*\)\s*:"#,   // function definition
        r#"import\s+[\w\s,]+"#,           // import statement
        r#"from\s+[\w.]+\s+import"#,      // from-import
        r#"print\s*\([^)]*\)"#,           // print call
        r#":\s*$"#,                       // trailing colon
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"def\s+\w+\s*\([^)]*\)\s*:|import\s+[\w\s,]+"#,
    boosters: &[
        Booster::new(r#"if\s+__name__\s*==\s*['"]__main__['"]"#, 8),
        Booster::new(r#"(?m)^\s*elif\s+.+:"#, 6),
        Booster::new(r#"(?m)^\s*(?:for|while|if|with)\s.+:\s*$"#, 5), // block header
        Booster::new(r#"(?m)^\s*from\s+[\w.]+\s+import\s"#, 6),
        Booster::new(r#"\bself\.\w+"#, 5),
    ],
};

pub static JAVASCRIPT: LanguageDefinition = LanguageDefinition {
    name: "JavaScript",
    aliases: &["js", "node", "nodejs"],
    extension: "js",
    markers: JS_MARKERS,
    requires: &[],
    case_insensitive: false,
    signature: r#"function\s+\w+\s*\([^)]*\)|const\s+\w+\s*="#,
    boosters: &[
        Booster::new(r#"console\.(?:log|error|warn)\("#, 6),
        Booster::new(r#"require\(\s*['"]"#, 6),
        Booster::new(r#"\bdocument\.\w+"#, 7),
        Booster::new(r#"=>\s*\{"#, 5),
    ],
};

/// General JavaScript markers, shared with TypeScript's superset check
const JS_MARKERS: &[&str] = &[
    r#"function\s+\w+\s*\([^)]*\)"#,
    r#"const\s+\w+\s*="#,
    r#"let\s+\w+\s*="#,
    r#"var\s+\w+\s*="#,
    r#"console\.(log|error|warn)"#,
];

pub static JAVA: LanguageDefinition = LanguageDefinition {
    name: "Java",
    aliases: &[],
    extension: "java",
    markers: &[
        r#"public\s+class\s+\w+"#,
        r#"public\s+static\s+void\s+main"#,
        r#"System\.(out|err)\."#,
        r#"private|protected|public"#,
        r#"import\s+java\."#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"public\s+class\s+\w+|public\s+static\s+void\s+main"#,
    boosters: &[
        Booster::new(r#"System\.(?:out|err)\.print"#, 6),
        Booster::new(r#"public\s+static\s+void\s+main\s*\(\s*String"#, 8),
        Booster::new(r#"import\s+java\."#, 8),
        Booster::new(r#"@Override\b"#, 5),
    ],
};

pub static CPP: LanguageDefinition = LanguageDefinition {
    name: "C++",
    aliases: &["cpp", "cxx", "c++17"],
    extension: "cpp",
    markers: &[
        r#"#include\s*<[^>]+>"#,
        r#"std::\w+"#,
        r#"cout\s*<<"#,
        r#"cin\s*>>"#,
        r#"int\s+main\s*\("#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"#include\s*<[^>]+>|std::\w+"#,
    boosters: &[
        Booster::new(r#"std::(?:cout|cin|vector|string|map)\b"#, 6),
        Booster::new(r#"#include\s*<(?:iostream|vector|string|map|algorithm)>"#, 7),
        Booster::new(r#"using\s+namespace\s+std\s*;"#, 8),
    ],
};

pub static JULIA: LanguageDefinition = LanguageDefinition {
    name: "Julia",
    aliases: &["jl"],
    extension: "jl",
    markers: &[
        r#"function\s+\w+\s*\([^)]*\)\s*end"#,
        r#"println\("#,
        r#"using\s+\w+"#,
        r#"module\s+\w+"#,
        r#"struct\s+\w+"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"function\s+\w+\s*\([^)]*\)\s*end|\bmodule\s+\w+|\bstruct\s+\w+"#,
    boosters: &[
        // brace-less struct header on its own line
        Booster::new(r#"(?m)^\s*(?:mutable\s+)?struct\s+\w+\s*$"#, 6),
        Booster::new(r#"::\s*(?:Int|Float|String|Bool|Vector|Array)\w*"#, 5),
        Booster::new(r#"(?m)^\s*using\s+\w+(?:\s*,\s*\w+)*\s*$"#, 5),
    ],
};

pub static GO: LanguageDefinition = LanguageDefinition {
    name: "Go",
    aliases: &["golang"],
    extension: "go",
    markers: &[
        r#"package\s+\w+"#,
        r#"func\s+\w+\s*\("#,
        r#"import\s*\("#,
        r#"fmt\."#,
        r#"type\s+\w+\s+struct"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"package\s+\w+|func\s+\w+\s*\("#,
    boosters: &[
        Booster::new(r#"package\s+main\b"#, 7),
        Booster::new(r#"fmt\.(?:Print|Sprint|Fprint)"#, 6),
        Booster::new(r#"\w\s*:=\s*"#, 5),
        Booster::new(r#"func\s*\(\w+\s+\*?\w+\)\s*\w+\s*\("#, 6),
    ],
};

pub static RUBY: LanguageDefinition = LanguageDefinition {
    name: "Ruby",
    aliases: &["rb"],
    extension: "rb",
    markers: &[
        r#"def\s+\w+\s*(?:\([^)]*\))?\s*$"#,
        r#"class\s+\w+(?:\s*<\s*\w+)?\s*$"#,
        r#"require\s+["']\w+["']"#,
        r#"\b(?:puts|print)\s"#,
        r#"\bdo\s*\|[^|]*\|"#,
        r#"\bend\b"#,
        r#":[a-zA-Z_]\w*\s*=>"#,
        r#"[a-zA-Z_]\w*:\s*[^,\s]"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"\bdef\s+\w+\s*(?:\([^)]*\))?\s*$|\bend\b"#,
    boosters: &[
        Booster::new(r#"(?m)^\s*puts\s"#, 6),
        Booster::new(r#"\bdo\s*\|[^|]*\|"#, 6),
        Booster::new(r#"\battr_(?:reader|writer|accessor)\b"#, 8),
        Booster::new(r#"require\s+['"]\w+['"]"#, 5),
    ],
};

pub static SWIFT: LanguageDefinition = LanguageDefinition {
    name: "Swift",
    aliases: &[],
    extension: "swift",
    markers: &[
        r#"import\s+(?:Foundation|UIKit|SwiftUI)"#,
        r#"(?:var|let)\s+\w+\s*:\s*\w+"#,
        r#"func\s+\w+\s*\([^)]*\)\s*(?:->\s*\w+)?\s*\{"#,
        r#"class\s+\w+(?:\s*:\s*\w+)?\s*\{"#,
        r#"struct\s+\w+\s*\{"#,
        r#"@IBOutlet|@IBAction"#,
        r#"guard\s+let"#,
        r#"if\s+let|if\s+var"#,
        r#"override\s+func"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"import\s+(?:Foundation|UIKit|SwiftUI)|@IBOutlet|@IBAction"#,
    boosters: &[
        Booster::new(r#"import\s+(?:Foundation|UIKit|SwiftUI)"#, 8),
        Booster::new(r#"guard\s+let\b"#, 7),
        Booster::new(r#"\bfunc\s+\w+\s*\([^)]*\)\s*->"#, 6),
        Booster::new(r#"@(?:IBOutlet|IBAction|State|Published)\b"#, 8),
    ],
};

pub static RUST: LanguageDefinition = LanguageDefinition {
    name: "Rust",
    aliases: &["rs"],
    extension: "rs",
    markers: &[
        r#"fn\s+\w+\s*\([^)]*\)\s*(?:->\s*[^{]+)?\s*\{"#,
        r#"let\s+mut\s+\w+"#,
        r#"struct\s+\w+\s*\{[^}]*\}"#,
        r#"impl\s+\w+(?:\s+for\s+\w+)?"#,
        r#"use\s+[\w:]+"#,
        r#"pub\s+(?:fn|struct|enum|mod)"#,
        r#"Vec<[^>]+>"#,
        r#"match\s+\w+\s*\{"#,
        r##"#\[\w+(?:\([^)]*\))?\]"##,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"fn\s+\w+\s*\([^)]*\)\s*(?:->\s*[^{]+)?\s*\{|impl\s+\w+(?:\s+for\s+\w+)?"#,
    boosters: &[
        Booster::new(r#"println!\("#, 6),
        Booster::new(r#"let\s+mut\s"#, 6),
        Booster::new(r#"impl\s+\w+\s+for\s"#, 7),
        Booster::new(r#"&(?:mut\s+)?self\b"#, 6),
        Booster::new(r#"\bfn\s+main\s*\(\s*\)"#, 5),
    ],
};

pub static CSHARP: LanguageDefinition = LanguageDefinition {
    name: "C#",
    aliases: &["csharp", "cs"],
    extension: "cs",
    markers: &[
        r#"using\s+[\w.]+;"#,
        r#"namespace\s+[\w.]+"#,
        r#"(public|private|protected|internal)\s+(class|struct|interface|enum)"#,
        r#"(public|private|protected|internal)\s+[\w<>\[\]]+\s+\w+\s*\("#,
        r#"Console\.(Write|WriteLine)"#,
        r#"\bvar\s+\w+\s*="#,
        r#"new\s+\w+\s*\("#,
        r#"\bawait\s+"#,
        r#"\btask<"#,
        r#"\bdynamic\b"#,
        r#"\bstring\b"#,
        r#"\$"[^"]*\{"#,
    ],
    requires: &[],
    case_insensitive: true,
    signature: r#"using\s+[\w.]+;|namespace\s+[\w.]+"#,
    boosters: &[
        Booster::new(r#"Console\.Write(?:Line)?\s*\("#, 7),
        Booster::new(r#"using\s+System\b"#, 8),
        Booster::new(r#"\{\s*get;\s*(?:set;)?\s*\}"#, 8),
    ],
};

pub static TYPESCRIPT: LanguageDefinition = LanguageDefinition {
    name: "TypeScript",
    aliases: &["ts"],
    extension: "ts",
    markers: &[
        r#":\s*[A-Za-z]+(?:<[^>]+>)?\s*(?:=|;|\)|\})"#,
        r#"interface\s+\w+\s*\{"#,
        r#"class\s+\w+(?:\s+implements|\s+extends)?"#,
        r#"(private|public|protected)\s+\w+"#,
        r#"\w+\s*<[^>]+>"#,
        r#"import\s+\{[^}]+\}\s+from"#,
        r#"export\s+(interface|class|type|const|let)"#,
        r#"type\s+\w+\s*="#,
        r#"enum\s+\w+"#,
        r#"@\w+(?:\([^)]*\))?"#,
    ],
    // superset of JavaScript: a TypeScript marker alone is not enough
    requires: JS_MARKERS,
    case_insensitive: false,
    signature: r#":\s*[A-Za-z]+(?:<[^>]+>)?\s*(?:=|;|\)|\})"#,
    boosters: &[
        Booster::new(r#"interface\s+\w+\s*\{"#, 6),
        Booster::new(r#":\s*(?:string|number|boolean|void|any)\b"#, 6),
        Booster::new(r#"\btype\s+\w+\s*="#, 5),
        Booster::new(r#"export\s+(?:interface|type)\s"#, 7),
    ],
};

pub static R_LANG: LanguageDefinition = LanguageDefinition {
    name: "R",
    aliases: &["rlang"],
    extension: "r",
    markers: &[
        r#"<-\s*(?:function|\w+)"#,
        r#"library\([\w.]+\)"#,
        r#"(?:data|read)\.(?:frame|csv|table)"#,
        r#"\b(?:if|for|while)\s*\("#,
        r#"\$\w+"#,
        r#"\bNA\b|\bNULL\b|\bTRUE\b|\bFALSE\b"#,
        r#"c\(.*?\)"#,
        r#"(?:plot|ggplot)\("#,
        r#"\s*#.*$"#,
        r#"%>%"#,
        r#"\bfactor\("#,
        r#"\bstr\("#,
        r#"\bas\.\w+\("#,
        r#"\w+\s*<-\s*\w+\[.+?\]"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"<-\s*(?:function|\w+)|library\([\w.]+\)"#,
    boosters: &[
        Booster::new(r#"<-\s*function\s*\("#, 7),
        Booster::new(r#"library\([\w.]+\)"#, 7),
        Booster::new(r#"%>%"#, 8),
        Booster::new(r#"data\.frame\("#, 6),
    ],
};

pub static PERL: LanguageDefinition = LanguageDefinition {
    name: "Perl",
    aliases: &["pl"],
    extension: "pl",
    markers: &[
        r#"\$\w+"#,
        r#"@\w+"#,
        r#"%\w+"#,
        r#"use\s+[\w:]+\s*;"#,
        r#"\bsub\s+\w+\s*\{"#,
        r#"\bmy\s+(?:\$|@|%)\w+"#,
        r#"=~\s*(?:m|s|tr)"#,
        r#"print\s+(?:\$|@|%|")"#,
        r#"(?:if|unless|while|for|foreach)\s*\("#,
        r#"\{.*?\}.*?\{.*?\}"#,
        r#"->\w+"#,
        r#"\b(?:shift|pop|push|splice)"#,
        r#";\s*$"#,
        r#"#.*$"#,
        r#"\bdie\s+"#,
        r#"\bqw\s*\("#,
        r#"\$_"#,
        r#"\bdefined\s+(?:\$|@|%)"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"\buse\s+[\w:]+\s*;|\bmy\s+(?:\$|@|%)"#,
    boosters: &[
        Booster::new(r#"\bmy\s+\$\w+"#, 5),
        Booster::new(r#"\buse\s+strict\s*;"#, 8),
        Booster::new(r#"=~\s*(?:m|s|tr)/"#, 6),
        Booster::new(r#"\bforeach\s+my\s+\$"#, 7),
    ],
};

pub static LUA: LanguageDefinition = LanguageDefinition {
    name: "Lua",
    aliases: &[],
    extension: "lua",
    markers: &[
        r#"\blocal\s+\w+"#,
        r#"\bfunction\s+\w+(?:\w*\.\w+)*\s*\("#,
        r#"(?:end|then|do|else)\b"#,
        r#"\brequire\s*\(["\w.']+\)"#,
        r#"\breturn\s+.+?$"#,
        r#"\bnil\b"#,
        r#"\bfor\s+\w+\s*=\s*\d+\s*,\s*\d+"#,
        r#"\bfor\s+\w+(?:\s*,\s*\w+)*\s+in\b"#,
        r#"\bif\s+.+?\s+then\b"#,
        r#"\belseif\s+.+?\s+then\b"#,
        r#"\btable\.(\w+)\b"#,
        r#"\bstring\.(\w+)\b"#,
        r#"\bmath\.(\w+)\b"#,
        r#"\bpairs\(\w+\)"#,
        r#"\bipairs\(\w+\)"#,
        r#"\btostring\("#,
        r#"\btonumber\("#,
        r#"\bprint\("#,
        r#"--.*$"#,
        r#"\[\[.*?\]\]"#,
        r#"\{\s*[\w"']+\s*="#,
        r#"\w+\[\w+\]"#,
        r#"\w+\.\.\w+"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"\blocal\s+\w+|\bfunction\s+\w+(?:\w*\.\w+)*\s*\("#,
    boosters: &[
        Booster::new(r#"\blocal\s+\w+"#, 5),
        Booster::new(r#"\bi?pairs\(\w+\)"#, 5),
        Booster::new(r#"\w\s*~=\s*\w"#, 6),
    ],
};

pub static PHP: LanguageDefinition = LanguageDefinition {
    name: "PHP",
    aliases: &[],
    extension: "php",
    markers: &[
        r#"<\?php"#,
        r#"\$\w+"#,
        r#"function\s+\w+\s*\("#,
        r#"echo\s+[\$\w'"]+"#,
        r#"class\s+\w+(?:\s+extends|\s+implements)?"#,
        r#"(?:public|private|protected)\s+function"#,
        r#"(?:public|private|protected)\s+\$\w+"#,
        r#"namespace\s+[\w\\]+"#,
        r#"use\s+[\w\\]+"#,
        r#"=>"#,
        r#"array\s*\("#,
        r#"\[\s*['"]*\w+['"]*\s*\]"#,
        r#"require(?:_once)?\s*\("#,
        r#"include(?:_once)?\s*\("#,
        r#"new\s+\w+"#,
        r#"->"#,
        r#"::"#,
        r#"<\?=.*?(?:\?>|$)"#,
        r#"if\s*\(.+?\)\s*\{"#,
        r#"foreach\s*\(\s*\$\w+"#,
        r#";$"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"<\?php"#,
    boosters: &[
        Booster::new(r#"<\?php"#, 5),
        Booster::new(r#"\$this->"#, 7),
        Booster::new(r#"\becho\s"#, 5),
    ],
};

pub static KOTLIN: LanguageDefinition = LanguageDefinition {
    name: "Kotlin",
    aliases: &["kt"],
    extension: "kt",
    markers: &[
        r#"fun\s+\w+\s*\("#,
        r#"val\s+\w+(?:\s*:\s*\w+)?"#,
        r#"var\s+\w+(?:\s*:\s*\w+)?"#,
        r#"class\s+\w+(?:\s*\((?:[^)]*)\))?"#,
        r#"package\s+[\w.]+"#,
        r#"import\s+[\w.]+"#,
        r#"object\s+\w+"#,
        r#"interface\s+\w+"#,
        r#"data\s+class"#,
        r#"(?:override|open|abstract|final)\s+fun"#,
        r#"(?:companion|sealed)\s+object"#,
        r#"when\s*\("#,
        r#"(?:if|else|for|while)\s*\("#,
        r#"->"#,
        r#"[\w.()]+\.\w+\{"#,
        r#"(?:List|Set|Map)<"#,
        r#"(?:private|public|internal|protected)"#,
        r#"lateinit\s+var"#,
        r#"(?:suspend|inline)\s+fun"#,
        r#"@\w+(?:\([^)]*\))?"#,
    ],
    requires: &[],
    case_insensitive: false,
    signature: r#"\bfun\s+\w+\s*\(|\bval\s+\w+(?:\s*:\s*\w+)?"#,
    boosters: &[
        Booster::new(r#"package\s+com\."#, 8),
        Booster::new(r#"import\s+android\."#, 8),
        Booster::new(r#"import\s+kotlinx\."#, 8),
        Booster::new(r#"fun\s+main\(\)"#, 7),
        Booster::new(r#"class\s+\w+\s*:\s*\w+"#, 6),
        Booster::new(r#"data\s+class"#, 8),
        Booster::new(r#"companion\s+object"#, 8),
        Booster::new(r#"val\s+\w+\s*:\s*\w+"#, 5),
        Booster::new(r#"var\s+\w+\s*:\s*\w+"#, 5),
        Booster::new(r#"lateinit\s+var"#, 8),
        Booster::new(r#"override\s+fun"#, 6),
        Booster::new(r#"when\s*\("#, 5),
        Booster::new(r#"suspend\s+fun"#, 8),
        Booster::new(r#"coroutineScope"#, 8),
        Booster::new(r#"viewModel:"#, 6),
        Booster::new(r#"by\s+viewModels"#, 8),
        Booster::new(r#"by\s+lazy"#, 8),
    ],
};

pub static SQL: LanguageDefinition = LanguageDefinition {
    name: "SQL",
    aliases: &["mysql", "postgres", "postgresql", "sqlite"],
    extension: "sql",
    markers: &[
        r#"SELECT\s+[\w\*,\s]+\s+FROM"#,
        r#"INSERT\s+INTO\s+\w+"#,
        r#"UPDATE\s+\w+\s+SET"#,
        r#"DELETE\s+FROM\s+\w+"#,
        r#"CREATE\s+TABLE\s+\w+"#,
        r#"ALTER\s+TABLE\s+\w+"#,
        r#"DROP\s+TABLE\s+\w+"#,
        r#"TRUNCATE\s+TABLE\s+\w+"#,
        r#"JOIN\s+\w+\s+ON"#,
        r#"WHERE\s+\w+\s*(?:=|<|>|<=|>=|<>|!=|LIKE|IN)"#,
        r#"GROUP\s+BY\s+\w+"#,
        r#"ORDER\s+BY\s+\w+\s+(?:ASC|DESC)?"#,
        r#"HAVING\s+\w+"#,
        r#"CONSTRAINT\s+\w+"#,
        r#"PRIMARY\s+KEY"#,
        r#"FOREIGN\s+KEY"#,
        r#"\b(?:VARCHAR|INT|INTEGER|FLOAT|DATE|DATETIME|BOOLEAN|TEXT|BLOB)\b"#,
        r#"\b(?:COUNT|SUM|AVG|MIN|MAX)\s*\("#,
        r#"CASE\s+WHEN\s+.+?\s+THEN"#,
        r#"BEGIN\s+TRANSACTION"#,
        r#"\bCOMMIT\b"#,
        r#"\bROLLBACK\b"#,
    ],
    requires: &[],
    case_insensitive: true,
    signature: r#"(?i)SELECT\s+[\w\*,\s]+\s+FROM"#,
    boosters: &[
        Booster::new(r#"(?i)SELECT\s+[\w\*,\s]+\s+FROM"#, 5),
        Booster::new(r#"(?i)\bINSERT\s+INTO\b"#, 5),
        Booster::new(r#"(?i)\bCREATE\s+TABLE\b"#, 6),
    ],
};

/// Registry order. Scoring ties are broken by name, not by position here.
pub static ALL_LANGUAGES: &[&LanguageDefinition] = &[
    &PYTHON,
    &JAVASCRIPT,
    &JAVA,
    &CPP,
    &JULIA,
    &GO,
    &RUBY,
    &SWIFT,
    &RUST,
    &CSHARP,
    &TYPESCRIPT,
    &R_LANG,
    &PERL,
    &LUA,
    &PHP,
    &KOTLIN,
    &SQL,
];
