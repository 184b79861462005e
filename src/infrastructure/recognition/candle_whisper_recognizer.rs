use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::audio_decoder::decode_to_mono_16k;
use crate::application::ports::{Recognition, RecognitionAdapter, RecognitionError};
use crate::domain::RecognizedText;

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const MAX_DECODE_TOKENS: usize = 224;

/// Whisper on CPU via candle. One decode at a time; concurrent callers queue
/// on the model lock, and inference runs on the blocking pool.
pub struct CandleWhisperRecognizer {
    model_id: String,
    model: Arc<Mutex<m::model::Whisper>>,
    runtime: Arc<WhisperRuntime>,
}

/// Read-only state shared with the blocking inference task.
struct WhisperRuntime {
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
    prompt: Vec<u32>,
    eot: u32,
}

impl CandleWhisperRecognizer {
    /// Downloads (or reuses the hub cache for) `model_id`. `language` is a
    /// Whisper language code such as `vi`; autodetection when unset.
    pub fn new(model_id: &str, language: Option<&str>) -> Result<Self, RecognitionError> {
        let device = Device::Cpu;
        tracing::info!(model = model_id, ?language, "Loading Candle Whisper model");

        let api = Api::new().map_err(|e| load_err("hub", e))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));
        let config_path = repo
            .get("config.json")
            .map_err(|e| load_err("config.json", e))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| load_err("tokenizer.json", e))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| load_err("model.safetensors", e))?;
        let mel_path = api
            .repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model))
            .get("melfilters.bytes")
            .map_err(|e| load_err("melfilters.bytes", e))?;

        let config_json =
            std::fs::read_to_string(&config_path).map_err(|e| load_err("read config", e))?;
        let config: Config =
            serde_json::from_str(&config_json).map_err(|e| load_err("parse config", e))?;
        let tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| load_err("tokenizer", e))?;
        let mel_bytes = std::fs::read(&mel_path).map_err(|e| load_err("mel filters", e))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        let language_token = match language {
            Some(code) => Some(token_id(&tokenizer, &format!("<|{code}|>"))?),
            None => None,
        };

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| load_err("weights", e))?
        };
        let model =
            m::model::Whisper::load(&vb, config.clone()).map_err(|e| load_err("model", e))?;

        let prompt = prompt_tokens(&tokenizer, language_token)?;
        let eot = token_id(&tokenizer, m::EOT_TOKEN)?;

        tracing::info!(model = model_id, "Candle Whisper model loaded");
        Ok(Self {
            model_id: model_id.to_string(),
            model: Arc::new(Mutex::new(model)),
            runtime: Arc::new(WhisperRuntime {
                tokenizer,
                config,
                device,
                mel_filters,
                prompt,
                eot,
            }),
        })
    }
}

impl WhisperRuntime {
    fn mel_segments(&self, pcm: &[f32]) -> Result<Vec<Tensor>, RecognitionError> {
        let n_mel = self.config.num_mel_bins;
        pcm.chunks(m::N_SAMPLES)
            .map(|chunk| {
                let mut samples = chunk.to_vec();
                samples.resize(m::N_SAMPLES, 0.0);
                let mel = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
                let frames = mel.len() / n_mel;
                Tensor::from_vec(mel, (1, n_mel, frames), &self.device).map_err(failed)
            })
            .collect()
    }

    fn transcribe_pcm(
        &self,
        mut model: OwnedMutexGuard<m::model::Whisper>,
        pcm: &[f32],
    ) -> Result<Vec<String>, RecognitionError> {
        let mels = self.mel_segments(pcm)?;
        let mut segments = Vec::with_capacity(mels.len());
        for (index, mel) in mels.iter().enumerate() {
            tracing::debug!(segment = index, "Decoding speech segment");
            let text = decode_segment(
                &mut model,
                &self.tokenizer,
                &self.device,
                mel,
                &self.prompt,
                self.eot,
            )?;
            if !text.is_empty() {
                segments.push(text);
            }
        }
        Ok(segments)
    }
}

fn prompt_tokens(
    tokenizer: &Tokenizer,
    language_token: Option<u32>,
) -> Result<Vec<u32>, RecognitionError> {
    let mut tokens = vec![token_id(tokenizer, m::SOT_TOKEN)?];
    if let Some(language) = language_token {
        tokens.push(language);
    }
    tokens.push(token_id(tokenizer, m::TRANSCRIBE_TOKEN)?);
    tokens.push(token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?);
    Ok(tokens)
}

#[async_trait]
impl RecognitionAdapter for CandleWhisperRecognizer {
    #[tracing::instrument(skip(self), fields(model = %self.model_id))]
    async fn transcribe(&self, media_path: &Path) -> Result<Recognition, RecognitionError> {
        let data = tokio::fs::read(media_path).await?;
        let extension = media_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_string);

        let pcm = tokio::task::spawn_blocking(move || {
            decode_to_mono_16k(data, extension.as_deref())
        })
        .await
        .map_err(|e| RecognitionError::DecodingFailed(format!("decoder task: {e}")))??;

        let model = self.model.clone().lock_owned().await;
        let runtime = self.runtime.clone();
        let segments = tokio::task::spawn_blocking(move || runtime.transcribe_pcm(model, &pcm))
            .await
            .map_err(|e| RecognitionError::RecognitionFailed(format!("inference task: {e}")))??;

        let transcript = segments.join(" ");
        tracing::info!(
            segments = segments.len(),
            chars = transcript.len(),
            "Speech transcription completed"
        );
        Ok(Recognition {
            text: RecognizedText::Plain(transcript),
            model_name: self.model_id.clone(),
        })
    }
}

fn decode_segment(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
    prompt: &[u32],
    eot: u32,
) -> Result<String, RecognitionError> {
    let audio_features = model.encoder.forward(mel, true).map_err(failed)?;

    let mut tokens = prompt.to_vec();
    for _ in 0..MAX_DECODE_TOKENS {
        let input = Tensor::new(tokens.as_slice(), device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(failed)?;
        let hidden = model
            .decoder
            .forward(&input, &audio_features, tokens.len() == prompt.len())
            .map_err(failed)?;
        let logits = hidden
            .squeeze(0)
            .and_then(|h| model.decoder.final_linear(&h))
            .map_err(failed)?;
        let last = logits.dim(0).map_err(failed)? - 1;
        let next = logits
            .get(last)
            .and_then(|l| l.argmax(0))
            .and_then(|t| t.to_scalar::<u32>())
            .map_err(failed)?;

        if next == eot {
            break;
        }
        tokens.push(next);
    }
    model.reset_kv_cache();

    let text = tokenizer
        .decode(&tokens[prompt.len()..], true)
        .map_err(|e| RecognitionError::RecognitionFailed(format!("detokenize: {e}")))?;
    Ok(text.trim().to_string())
}

fn load_err(what: &str, e: impl std::fmt::Display) -> RecognitionError {
    RecognitionError::ModelLoadFailed(format!("{what}: {e}"))
}

fn failed(e: candle_core::Error) -> RecognitionError {
    RecognitionError::RecognitionFailed(e.to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, RecognitionError> {
    tokenizer
        .token_to_id(token)
        .ok_or_else(|| RecognitionError::ModelLoadFailed(format!("token not found: {token}")))
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, RecognitionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(RecognitionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
