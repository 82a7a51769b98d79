//! Speech providers: Clova STT for transcription and the translate-tts
//! endpoint for synthesis. Both are plain request/response wrappers
//! with bounded timeouts.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

const CLOVA_STT_URL: &str = "https://naveropenapi.apigw.ntruss.com/recog/v1/stt";
const TTS_URL: &str = "https://translate.google.com/translate_tts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct SttResponse {
    #[serde(default)]
    text: String,
}

#[derive(Clone)]
pub struct SpeechClient {
    http: Client,
    clova_client_id: String,
    clova_client_secret: String,
}

impl SpeechClient {
    pub fn new(clova_client_id: String, clova_client_secret: String) -> Self {
        Self {
            http: Client::new(),
            clova_client_id,
            clova_client_secret,
        }
    }

    pub fn has_stt_keys(&self) -> bool {
        !self.clova_client_id.trim().is_empty() && !self.clova_client_secret.trim().is_empty()
    }

    /// Korean speech → text via Clova.
    pub async fn transcribe(&self, audio: Vec<u8>) -> Result<String, String> {
        if !self.has_stt_keys() {
            return Err("Clova API 키가 설정되지 않았습니다.".to_string());
        }

        let res = self
            .http
            .post(CLOVA_STT_URL)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("lang", "Kor")])
            .header("X-NCP-APIGW-API-KEY-ID", &self.clova_client_id)
            .header("X-NCP-APIGW-API-KEY", &self.clova_client_secret)
            .header("Content-Type", "application/octet-stream")
            .body(audio)
            .send()
            .await
            .map_err(|e| format!("네트워크 오류: {e}"))?;

        if !res.status().is_success() {
            return Err(format!("음성 인식 실패: HTTP {}", res.status()));
        }

        let parsed = res
            .json::<SttResponse>()
            .await
            .map_err(|e| format!("응답 해석 실패: {e}"))?;

        if parsed.text.is_empty() {
            return Err("음성 인식에 실패했습니다.".to_string());
        }
        Ok(parsed.text)
    }

    /// Korean text → mp3 bytes. No key required.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, String> {
        let res = self
            .http
            .get(TTS_URL)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", "ko"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| format!("네트워크 오류: {e}"))?;

        if !res.status().is_success() {
            return Err(format!("음성 합성 실패: HTTP {}", res.status()));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| format!("응답 수신 실패: {e}"))?;
        Ok(bytes.to_vec())
    }
}
