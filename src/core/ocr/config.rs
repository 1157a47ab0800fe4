use super::error::OcrError;

/// ASCII letters and digits only.
pub const DEFAULT_CHAR_WHITELIST: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const DEFAULT_LANG: &str = "eng";

/// Tesseract tuning for one classification run.
///
/// Defaults: PSM 11 (sparse text), OEM 3 (default engine), alphanumeric
/// whitelist.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrConfig {
    pub lang: String,
    /// Page segmentation mode (`--psm`)
    pub psm: Option<u8>,
    /// OCR engine mode (`--oem`)
    pub oem: Option<u8>,
    /// `-c key=value` variables, in the order they are passed
    pub variables: Vec<(String, String)>,
    /// Anything else from a config string, passed through verbatim
    pub extra_args: Vec<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            psm: Some(11),
            oem: Some(3),
            variables: vec![(
                "tessedit_char_whitelist".to_string(),
                DEFAULT_CHAR_WHITELIST.to_string(),
            )],
            extra_args: Vec::new(),
        }
    }
}

impl OcrConfig {
    /// Settings of the slower second pass over frames already flagged once:
    /// fully automatic segmentation and no whitelist.
    pub fn second_pass() -> Self {
        Self {
            psm: Some(3),
            oem: Some(3),
            variables: Vec::new(),
            ..Self::default()
        }
    }

    /// Parse a tesseract-style config string such as
    /// `--psm 11 --oem 3 -c tessedit_char_whitelist=abc`.
    pub fn parse(config: &str) -> Result<Self, OcrError> {
        let mut parsed = Self {
            lang: DEFAULT_LANG.to_string(),
            psm: None,
            oem: None,
            variables: Vec::new(),
            extra_args: Vec::new(),
        };

        let mut args = config.split_whitespace();
        while let Some(arg) = args.next() {
            match arg {
                "--psm" => parsed.psm = Some(Self::mode_value(arg, args.next())?),
                "--oem" => parsed.oem = Some(Self::mode_value(arg, args.next())?),
                "-l" => {
                    parsed.lang = args
                        .next()
                        .ok_or_else(|| OcrError::InvalidConfig("-l needs a language".into()))?
                        .to_string();
                }
                "-c" => {
                    let assignment = args
                        .next()
                        .ok_or_else(|| OcrError::InvalidConfig("-c needs key=value".into()))?;
                    let (key, value) = assignment.split_once('=').ok_or_else(|| {
                        OcrError::InvalidConfig(format!("expected key=value after -c, got {assignment}"))
                    })?;
                    parsed.variables.push((key.to_string(), value.to_string()));
                }
                other => parsed.extra_args.push(other.to_string()),
            }
        }

        Ok(parsed)
    }

    fn mode_value(flag: &str, value: Option<&str>) -> Result<u8, OcrError> {
        let value = value.ok_or_else(|| OcrError::InvalidConfig(format!("{flag} needs a value")))?;
        value
            .parse()
            .map_err(|_| OcrError::InvalidConfig(format!("{flag} expects a number, got {value}")))
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Command-line arguments for the tesseract binary, after the image and
    /// output positions.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-l".to_string(), self.lang.clone()];
        if let Some(psm) = self.psm {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }
        if let Some(oem) = self.oem {
            args.push("--oem".to_string());
            args.push(oem.to_string());
        }
        for (key, value) in &self.variables {
            args.push("-c".to_string());
            args.push(format!("{key}={value}"));
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}
