use serde::Serialize;

/// Pitch band a voice is synthesized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGroup {
    High,
    Low,
}

impl VoiceGroup {
    /// Base (fundamental) frequency in Hz.
    pub fn base_frequency(self) -> f64 {
        match self {
            VoiceGroup::High => 220.0,
            VoiceGroup::Low => 110.0,
        }
    }

    /// The four formant frequencies in Hz, lowest first.
    pub fn formant_frequencies(self) -> [f64; 4] {
        match self {
            VoiceGroup::High => [500.0, 1500.0, 2500.0, 3500.0],
            VoiceGroup::Low => [400.0, 1200.0, 2200.0, 3200.0],
        }
    }
}

/// Display metadata for one entry of the fixed voice table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub gender: &'static str,
    pub language: &'static str,
    #[serde(skip)]
    pub group: VoiceGroup,
}

/// Voice used when a request does not name one.
pub const DEFAULT_VOICE: &str = "p225";

/// The fixed voice table. Female voices are in the high group.
pub static VOICES: [VoiceInfo; 6] = [
    VoiceInfo {
        id: "p225",
        name: "Female Voice 1",
        gender: "female",
        language: "en",
        group: VoiceGroup::High,
    },
    VoiceInfo {
        id: "p226",
        name: "Male Voice 1",
        gender: "male",
        language: "en",
        group: VoiceGroup::Low,
    },
    VoiceInfo {
        id: "p227",
        name: "Female Voice 2",
        gender: "female",
        language: "en",
        group: VoiceGroup::High,
    },
    VoiceInfo {
        id: "p228",
        name: "Male Voice 2",
        gender: "male",
        language: "en",
        group: VoiceGroup::Low,
    },
    VoiceInfo {
        id: "p229",
        name: "Female Voice 3",
        gender: "female",
        language: "en",
        group: VoiceGroup::High,
    },
    VoiceInfo {
        id: "p230",
        name: "Male Voice 3",
        gender: "male",
        language: "en",
        group: VoiceGroup::Low,
    },
];

/// Look up a voice in the fixed table.
pub fn voice_info(voice_id: &str) -> Option<&'static VoiceInfo> {
    VOICES.iter().find(|v| v.id == voice_id)
}

/// Resolve a voice id to its group. Unknown ids fall into the low group.
pub fn voice_group(voice_id: &str) -> VoiceGroup {
    voice_info(voice_id)
        .map(|v| v.group)
        .unwrap_or(VoiceGroup::Low)
}

/// Frequencies that shape the placeholder waveform for one voice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceProfile {
    pub voice_id: String,
    pub group: VoiceGroup,
    pub base_frequency: f64,
    pub formant_frequencies: [f64; 4],
}

impl VoiceProfile {
    pub fn for_voice(voice_id: &str) -> Self {
        let group = voice_group(voice_id);
        Self {
            voice_id: voice_id.to_string(),
            group,
            base_frequency: group.base_frequency(),
            formant_frequencies: group.formant_frequencies(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn female_voices_resolve_to_high_group() {
        for id in ["p225", "p227", "p229"] {
            let profile = VoiceProfile::for_voice(id);
            assert_eq!(profile.group, VoiceGroup::High, "{id}");
            assert_eq!(profile.base_frequency, 220.0);
            assert_eq!(profile.formant_frequencies, [500.0, 1500.0, 2500.0, 3500.0]);
        }
    }

    #[test]
    fn male_and_unknown_voices_resolve_to_low_group() {
        for id in ["p226", "p228", "p230", "", "P225", "af_heart", "../../etc"] {
            let profile = VoiceProfile::for_voice(id);
            assert_eq!(profile.group, VoiceGroup::Low, "{id:?}");
            assert_eq!(profile.base_frequency, 110.0);
            assert_eq!(profile.formant_frequencies, [400.0, 1200.0, 2200.0, 3200.0]);
        }
    }

    #[test]
    fn table_gender_matches_group() {
        for voice in &VOICES {
            let expected = if voice.gender == "female" {
                VoiceGroup::High
            } else {
                VoiceGroup::Low
            };
            assert_eq!(voice.group, expected, "{}", voice.id);
        }
    }
}
