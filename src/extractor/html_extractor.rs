//! HTML信号提取器
//! 负责从响应体中提取title和meta generator，容忍残缺/非法HTML

use std::cell::{Cell, RefCell};

use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;

/// 提取结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HtmlSignals {
    pub title: String,
    pub generator: String,
}

#[derive(Debug, Default)]
pub struct HtmlExtractor {
    in_title: Cell<bool>,
    title: RefCell<String>,
    generator: RefCell<Option<String>>,
}

impl TokenSink for HtmlExtractor {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(Tag {
                kind: TagKind::StartTag,
                name,
                self_closing,
                attrs,
                ..
            }) => {
                match &*name {
                    "title" => self.in_title.set(true),
                    "meta" => self.extract_generator(&attrs),
                    _ => {}
                }
                // 自闭合形式（如 <title/>）按普通标签处理，不切换状态
                if !self_closing {
                    if let Some(result) = raw_text_state(&name) {
                        return result;
                    }
                }
            }
            Token::TagToken(Tag {
                kind: TagKind::EndTag,
                name,
                ..
            }) if &*name == "title" => self.in_title.set(false),
            Token::CharacterTokens(text) if self.in_title.get() => {
                self.title.borrow_mut().push_str(&text);
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// 内容不按标签解析的元素，对应浏览器的 RCDATA / RAWTEXT / script data 状态
fn raw_text_state(name: &str) -> Option<TokenSinkResult<()>> {
    let kind = match name {
        "title" | "textarea" => RawKind::Rcdata,
        "script" => RawKind::ScriptData,
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => RawKind::Rawtext,
        "plaintext" => return Some(TokenSinkResult::Plaintext),
        _ => return None,
    };
    Some(TokenSinkResult::RawData(kind))
}

impl HtmlExtractor {
    /// 创建新的提取器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从原始字节提取信号（非UTF-8字节按替换字符处理）
    pub fn extract(body: &[u8]) -> HtmlSignals {
        if body.is_empty() {
            return HtmlSignals::default();
        }

        let html = String::from_utf8_lossy(body);
        let tokenizer = Tokenizer::new(Self::new(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(&*html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        tokenizer.sink.into_signals()
    }

    /// 提取meta generator，先出现者优先
    fn extract_generator(&self, attrs: &[Attribute]) {
        if self.generator.borrow().is_some() {
            return;
        }

        let mut name = "";
        let mut content = "";
        for attr in attrs {
            let key: &str = &attr.name.local;
            if key.eq_ignore_ascii_case("name") {
                name = attr.value.trim();
            } else if key.eq_ignore_ascii_case("content") {
                content = attr.value.trim();
            }
        }

        if name.eq_ignore_ascii_case("generator") && !content.is_empty() {
            *self.generator.borrow_mut() = Some(content.to_string());
        }
    }

    fn into_signals(self) -> HtmlSignals {
        HtmlSignals {
            title: self.title.into_inner().trim().to_string(),
            generator: self.generator.into_inner().unwrap_or_default(),
        }
    }
}

/// 便捷函数：返回 (title, generator)
pub fn extract_html_signals(body: &[u8]) -> (String, String) {
    let signals = HtmlExtractor::extract(body);
    (signals.title, signals.generator)
}
