/// 提交语言
///
/// 只区分需要特殊注释符或扩展名的几种，其余一律归为 `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Python 3
    Python3,
    /// Go
    Golang,
    /// C++
    Cpp,
    /// Java
    Java,
    /// 其他语言
    Other,
}

impl Language {
    /// 从力扣的语言标识解析
    pub fn from_lang(lang: &str) -> Self {
        match lang {
            "python3" => Language::Python3,
            "golang" => Language::Golang,
            "cpp" => Language::Cpp,
            "java" => Language::Java,
            _ => Language::Other,
        }
    }

    /// 单行注释符
    pub fn comment_marker(self) -> &'static str {
        match self {
            Language::Python3 => "#",
            _ => "//",
        }
    }

    /// 文件扩展名（含点），未知语言为空
    pub fn extension(self) -> &'static str {
        match self {
            Language::Python3 => ".py",
            Language::Golang => ".go",
            Language::Cpp => ".cpp",
            Language::Java => ".java",
            Language::Other => "",
        }
    }
}
