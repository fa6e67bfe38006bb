//! Static caption tables. Every family has an English row; translated rows
//! must keep the same variant order so one index addresses the same caption
//! in every language.

use serde::{Deserialize, Serialize};

use super::PhraseCategory;
use crate::corpus::Language;

/// A caption family: one category plus the sub-pattern that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseKey {
    ComfortValley,
    ComfortCastCare,
    ComfortGeneral,
    EmpowermentAllThings,
    EmpowermentGeneral,
    EncouragementFuture,
    EncouragementGeneral,
    WisdomPath,
    WisdomGeneral,
    Love,
    Fallback,
}

impl PhraseKey {
    pub fn category(&self) -> PhraseCategory {
        match self {
            PhraseKey::ComfortValley | PhraseKey::ComfortCastCare | PhraseKey::ComfortGeneral => {
                PhraseCategory::Comfort
            }
            PhraseKey::EmpowermentAllThings | PhraseKey::EmpowermentGeneral => {
                PhraseCategory::Empowerment
            }
            PhraseKey::EncouragementFuture | PhraseKey::EncouragementGeneral | PhraseKey::Love => {
                PhraseCategory::Encouragement
            }
            PhraseKey::WisdomPath | PhraseKey::WisdomGeneral | PhraseKey::Fallback => {
                PhraseCategory::Wisdom
            }
        }
    }
}

type Row = &'static [&'static str];

/// English captions for a family. Never empty.
pub fn english(key: PhraseKey) -> Row {
    match key {
        PhraseKey::ComfortValley => &[
            "Even in the darkest valley, you are never walking alone.",
            "The shadows are real, but so is the One beside you.",
            "Through every valley, His presence goes with you.",
        ],
        PhraseKey::ComfortCastCare => &[
            "Hand Him the weight you were never meant to carry.",
            "Your worries are safe in His hands tonight.",
            "Let go of the burden; He cares for you.",
        ],
        PhraseKey::ComfortGeneral => &[
            "You are held, even when you cannot feel it.",
            "Rest here. His peace is closer than your next breath.",
            "Comfort is coming. You are not forgotten.",
        ],
        PhraseKey::EmpowermentAllThings => &[
            "What feels impossible today is possible with Him.",
            "You were made for more than you think you can do.",
            "His strength carries you past every limit.",
        ],
        PhraseKey::EmpowermentGeneral => &[
            "Stand tall. You are stronger than this moment.",
            "Courage is not the absence of fear, but trust in Him.",
            "His power is at work in your weakness.",
        ],
        PhraseKey::EncouragementFuture => &[
            "Your story is still being written, and it is good.",
            "Tomorrow holds a hope you cannot see yet.",
            "The plans for you were made in love.",
        ],
        PhraseKey::EncouragementGeneral => &[
            "Keep going. Joy is on its way.",
            "Every morning brings a fresh start.",
            "Hold on to hope; it will hold on to you.",
        ],
        PhraseKey::WisdomPath => &[
            "One step at a time, the way becomes clear.",
            "Let His word light the next step.",
            "You do not need the whole map, only the lamp.",
        ],
        PhraseKey::WisdomGeneral => &[
            "Ask, listen, and wisdom will meet you there.",
            "True understanding begins with humble trust.",
            "Slow down. Wisdom whispers.",
        ],
        PhraseKey::Love => &[
            "You are loved beyond measure.",
            "Love first, and love well.",
            "Nothing can separate you from this love.",
        ],
        PhraseKey::Fallback => &[
            "Let this truth settle deep in your heart today.",
            "Carry this word with you wherever you go.",
            "A timeless truth for this very moment.",
        ],
    }
}

fn spanish(key: PhraseKey) -> Option<Row> {
    let row: Row = match key {
        PhraseKey::ComfortValley => &[
            "Aun en el valle más oscuro, nunca caminas solo.",
            "Las sombras son reales, pero también Aquel que está a tu lado.",
            "En cada valle, su presencia va contigo.",
        ],
        PhraseKey::ComfortCastCare => &[
            "Entrégale el peso que nunca debiste cargar.",
            "Tus preocupaciones están seguras en sus manos esta noche.",
            "Suelta la carga; Él cuida de ti.",
        ],
        PhraseKey::ComfortGeneral => &[
            "Estás sostenido, aunque no lo sientas.",
            "Descansa aquí. Su paz está más cerca que tu próximo aliento.",
            "El consuelo viene. No estás olvidado.",
        ],
        PhraseKey::EmpowermentAllThings => &[
            "Lo que hoy parece imposible es posible con Él.",
            "Fuiste hecho para más de lo que crees poder hacer.",
            "Su fuerza te lleva más allá de cada límite.",
        ],
        PhraseKey::EmpowermentGeneral => &[
            "Levántate. Eres más fuerte que este momento.",
            "El valor no es la ausencia de miedo, sino confiar en Él.",
            "Su poder obra en tu debilidad.",
        ],
        PhraseKey::EncouragementFuture => &[
            "Tu historia aún se está escribiendo, y es buena.",
            "El mañana guarda una esperanza que aún no ves.",
            "Los planes para ti fueron hechos con amor.",
        ],
        PhraseKey::EncouragementGeneral => &[
            "Sigue adelante. La alegría está en camino.",
            "Cada mañana trae un nuevo comienzo.",
            "Aférrate a la esperanza; ella te sostendrá.",
        ],
        PhraseKey::WisdomPath => &[
            "Paso a paso, el camino se aclara.",
            "Deja que su palabra ilumine el siguiente paso.",
            "No necesitas todo el mapa, solo la lámpara.",
        ],
        PhraseKey::WisdomGeneral => &[
            "Pide, escucha, y la sabiduría te encontrará.",
            "El verdadero entendimiento comienza con una confianza humilde.",
            "Ve más despacio. La sabiduría susurra.",
        ],
        PhraseKey::Love => &[
            "Eres amado sin medida.",
            "Ama primero, y ama bien.",
            "Nada puede separarte de este amor.",
        ],
        PhraseKey::Fallback => &[
            "Deja que esta verdad se asiente hoy en tu corazón.",
            "Lleva esta palabra contigo dondequiera que vayas.",
            "Una verdad eterna para este mismo momento.",
        ],
    };
    Some(row)
}

fn french(key: PhraseKey) -> Option<Row> {
    let row: Row = match key {
        PhraseKey::ComfortValley => &[
            "Même dans la vallée la plus sombre, tu ne marches jamais seul.",
            "Les ombres sont réelles, mais Celui qui est à tes côtés l'est aussi.",
            "À travers chaque vallée, sa présence t'accompagne.",
        ],
        PhraseKey::ComfortCastCare => &[
            "Confie-lui le poids que tu n'as jamais dû porter.",
            "Tes soucis sont en sécurité entre ses mains ce soir.",
            "Lâche le fardeau ; il prend soin de toi.",
        ],
        PhraseKey::ComfortGeneral => &[
            "Tu es tenu, même quand tu ne le sens pas.",
            "Repose-toi ici. Sa paix est plus proche que ton prochain souffle.",
            "Le réconfort arrive. Tu n'es pas oublié.",
        ],
        PhraseKey::EmpowermentAllThings => &[
            "Ce qui semble impossible aujourd'hui est possible avec lui.",
            "Tu as été fait pour plus que ce que tu crois pouvoir faire.",
            "Sa force te porte au-delà de chaque limite.",
        ],
        PhraseKey::EmpowermentGeneral => &[
            "Tiens-toi debout. Tu es plus fort que ce moment.",
            "Le courage n'est pas l'absence de peur, mais la confiance en lui.",
            "Sa puissance agit dans ta faiblesse.",
        ],
        PhraseKey::EncouragementFuture => &[
            "Ton histoire s'écrit encore, et elle est belle.",
            "Demain renferme une espérance que tu ne vois pas encore.",
            "Les projets pour toi ont été faits avec amour.",
        ],
        PhraseKey::EncouragementGeneral => &[
            "Continue. La joie est en chemin.",
            "Chaque matin apporte un nouveau départ.",
            "Accroche-toi à l'espérance ; elle te tiendra.",
        ],
        PhraseKey::WisdomPath => &[
            "Pas à pas, le chemin devient clair.",
            "Laisse sa parole éclairer le prochain pas.",
            "Tu n'as pas besoin de toute la carte, seulement de la lampe.",
        ],
        PhraseKey::WisdomGeneral => &[
            "Demande, écoute, et la sagesse viendra à ta rencontre.",
            "La vraie compréhension commence par une humble confiance.",
            "Ralentis. La sagesse murmure.",
        ],
        PhraseKey::Love => &[
            "Tu es aimé au-delà de toute mesure.",
            "Aime d'abord, et aime bien.",
            "Rien ne peut te séparer de cet amour.",
        ],
        PhraseKey::Fallback => return None,
    };
    Some(row)
}

fn portuguese(key: PhraseKey) -> Option<Row> {
    let row: Row = match key {
        PhraseKey::ComfortValley => &[
            "Mesmo no vale mais escuro, você nunca caminha sozinho.",
            "As sombras são reais, mas Aquele ao seu lado também é.",
            "Em cada vale, a presença dEle vai com você.",
        ],
        PhraseKey::ComfortCastCare => &[
            "Entregue a Ele o peso que você nunca precisou carregar.",
            "Suas preocupações estão seguras nas mãos dEle esta noite.",
            "Solte o fardo; Ele cuida de você.",
        ],
        PhraseKey::ComfortGeneral => &[
            "Você está amparado, mesmo quando não sente.",
            "Descanse aqui. A paz dEle está mais perto que o seu próximo fôlego.",
            "O consolo está chegando. Você não foi esquecido.",
        ],
        PhraseKey::EmpowermentAllThings => &[
            "O que parece impossível hoje é possível com Ele.",
            "Você foi feito para mais do que imagina conseguir.",
            "A força dEle leva você além de cada limite.",
        ],
        PhraseKey::EmpowermentGeneral => &[
            "Fique de pé. Você é mais forte que este momento.",
            "Coragem não é ausência de medo, mas confiança nEle.",
            "O poder dEle age na sua fraqueza.",
        ],
        PhraseKey::EncouragementFuture => &[
            "Sua história ainda está sendo escrita, e ela é boa.",
            "O amanhã guarda uma esperança que você ainda não vê.",
            "Os planos para você foram feitos com amor.",
        ],
        PhraseKey::EncouragementGeneral => &[
            "Continue. A alegria está a caminho.",
            "Cada manhã traz um novo começo.",
            "Segure firme a esperança; ela segurará você.",
        ],
        PhraseKey::WisdomPath => &[
            "Um passo de cada vez, o caminho fica claro.",
            "Deixe a palavra dEle iluminar o próximo passo.",
            "Você não precisa do mapa inteiro, só da lâmpada.",
        ],
        PhraseKey::WisdomGeneral => &[
            "Peça, ouça, e a sabedoria encontrará você.",
            "O verdadeiro entendimento começa com confiança humilde.",
            "Vá devagar. A sabedoria sussurra.",
        ],
        PhraseKey::Love => &[
            "Você é amado além da medida.",
            "Ame primeiro, e ame bem.",
            "Nada pode separar você deste amor.",
        ],
        PhraseKey::Fallback => return None,
    };
    Some(row)
}

/// Caption row for `key` in `language`, or `None` when that language has
/// no table for the family.
pub fn variants(key: PhraseKey, language: Language) -> Option<Row> {
    match language {
        Language::English => Some(english(key)),
        Language::Spanish => spanish(key),
        Language::French => french(key),
        Language::Portuguese => portuguese(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [PhraseKey; 11] = [
        PhraseKey::ComfortValley,
        PhraseKey::ComfortCastCare,
        PhraseKey::ComfortGeneral,
        PhraseKey::EmpowermentAllThings,
        PhraseKey::EmpowermentGeneral,
        PhraseKey::EncouragementFuture,
        PhraseKey::EncouragementGeneral,
        PhraseKey::WisdomPath,
        PhraseKey::WisdomGeneral,
        PhraseKey::Love,
        PhraseKey::Fallback,
    ];

    #[test]
    fn test_translations_keep_variant_count() {
        for key in ALL_KEYS {
            let n = english(key).len();
            assert!(n > 0);
            for lang in [Language::Spanish, Language::French, Language::Portuguese] {
                if let Some(row) = variants(key, lang) {
                    assert_eq!(row.len(), n, "{key:?} {lang:?} variant count differs");
                }
            }
        }
    }
}
