//! The built-in "Call of the Wild" story.
//!
//! Seven chapters follow Buck from the Santa Clara valley to the wolf pack.
//! Two choices fork on wildness (scene 9 and scene 15) and three scenes are
//! battles (4, 12 and 18). Every run ends at scene 19.

use wild_battle::EnemyRoster;
use wild_core::Effect;
use wild_core::Stat::{self, Cold, Fatigue, Hunger, Loyalty, Morale, Respect, Survival, Wildness};

use crate::condition::Condition;
use crate::error::StoryResult;
use crate::graph::SceneGraph;
use crate::scene::{Choice, Scene, SceneId, SceneTarget};

/// Id of the opening scene.
pub const START: SceneId = 0;

/// The complete story, validated.
pub fn call_of_the_wild() -> StoryResult<SceneGraph> {
    let scenes = [
        stolen_from_home(),
        law_of_club(),
        sled_team(),
        leadership(),
        the_call(),
        thornton(),
        blood_on_the_snow(),
    ]
    .concat();
    SceneGraph::new(START, scenes, EnemyRoster::standard())
}

struct Chapter {
    number: u32,
    title: &'static str,
}

impl Chapter {
    fn new(number: u32, title: &'static str) -> Self {
        Self { number, title }
    }

    fn story(&self, id: SceneId, text: &str, choices: [Choice; 4]) -> Scene {
        Scene::story(id, self.number, self.title, text, choices.into())
    }

    fn battle(&self, id: SceneId, text: &str, enemy: &str, win: SceneId, lose: SceneId) -> Scene {
        Scene::battle(id, self.number, self.title, text, enemy, win, lose)
    }
}

fn pick(text: &str, effect: &[(Stat, i32)], next: impl Into<SceneTarget>) -> Choice {
    Choice::new(text).with_effect(Effect::from_pairs(effect)).to(next)
}

fn stolen_from_home() -> Vec<Scene> {
    let chapter = Chapter::new(1, "Stolen From Home");
    vec![
        chapter.story(
            0,
            "You awaken in a wooden crate on a ship. The air smells of salt and fear.\n\nDo you feel more like a pet or a prisoner?",
            [
                pick("A pet, confused and loyal", &[(Loyalty, 2), (Morale, -1)], 1),
                pick("A prisoner, angry and wild", &[(Wildness, 2), (Morale, -1)], 1),
                pick("Neither. Just something trapped", &[(Survival, 1)], 1),
                pick("You refuse to name what you feel", &[(Morale, -1), (Survival, 1)], 20),
            ],
        ),
        chapter.story(
            20,
            "The crate rocks with the waves. You brace yourself.\n\nWhat memory of Judge Miller still lingers in your mind?",
            [
                pick("The warmth of the sunlit veranda", &[(Loyalty, 1), (Morale, 1)], 1),
                pick("The sound of his voice calling your name", &[(Loyalty, 2)], 1),
                pick("The feel of grass under your paws", &[(Wildness, 1), (Morale, 1)], 1),
                pick("You push the memory away", &[(Wildness, 1), (Loyalty, -1)], 1),
            ],
        ),
        chapter.story(
            1,
            "Rough hands shake the crate. You slam against the boards.\n\nIs strength earned through pain or patience?",
            [
                pick("Through pain", &[(Wildness, 2), (Survival, -1)], 2),
                pick("Through patience", &[(Survival, 1), (Morale, 1)], 2),
                pick("Through obedience", &[(Loyalty, 1)], 21),
                pick("Through refusing to break", &[(Survival, 1), (Morale, 1)], 2),
            ],
        ),
        chapter.story(
            21,
            "You lower your head, letting the moment pass.\n\nDo you believe obedience keeps you safe, or only quiet?",
            [
                pick("Safe. For now.", &[(Loyalty, 1), (Survival, 1)], 2),
                pick("Quiet, but not safe", &[(Wildness, 1), (Morale, 1)], 2),
                pick("You don't know anymore", &[(Morale, -1)], 2),
                pick("You stop thinking and wait", &[(Fatigue, 1)], 2),
            ],
        ),
        chapter.story(
            2,
            "The crate opens. Cold air rushes in. Strange faces stare down at you.",
            [
                pick("Lunge at the nearest man", &[(Wildness, 2), (Survival, -1), (Hunger, 1)], 3),
                pick("Step out slowly", &[(Loyalty, 1), (Survival, 1)], 3),
                pick("Stay still and watch", &[(Survival, 1), (Fatigue, 1)], 22),
                pick("Growl low, a warning", &[(Wildness, 1), (Respect, 1)], 3),
            ],
        ),
        chapter.story(
            22,
            "You study their faces, their eyes, their hands.\n\nDo you see them as masters, threats, or puzzles?",
            [
                pick("Masters", &[(Loyalty, 2), (Morale, -1)], 3),
                pick("Threats", &[(Wildness, 2), (Survival, 1)], 3),
                pick("Puzzles to be solved", &[(Survival, 1), (Respect, 1)], 3),
                pick("You see nothing but the club", &[(Survival, 1), (Morale, -1)], 3),
            ],
        ),
        chapter.story(
            3,
            "Snow crunches under boots. A man in a red sweater waits, holding a club.\n\nWhat does loyalty mean when the world is cruel?",
            [
                pick("Loyalty is weakness", &[(Wildness, 2), (Loyalty, -1)], 4),
                pick("Loyalty is survival", &[(Loyalty, 2), (Survival, 1)], 4),
                pick("Loyalty is a memory of home", &[(Morale, 1)], 23),
                pick("Loyalty is a chain you must break", &[(Wildness, 2), (Morale, 1)], 4),
            ],
        ),
        chapter.story(
            23,
            "You remember gentle hands and soft words.\n\nDoes that memory make this moment easier or harder?",
            [
                pick("Easier. You know kindness exists.", &[(Morale, 1), (Loyalty, 1)], 4),
                pick("Harder. This feels like betrayal.", &[(Wildness, 1), (Morale, -1)], 4),
                pick("Both. The world is split in two.", &[(Survival, 1)], 4),
                pick("You bury the memory deep.", &[(Wildness, 1), (Loyalty, -1)], 4),
            ],
        ),
        chapter.battle(
            4,
            "The man in the red sweater raises the club. You feel the old life tearing away.",
            "redSweater",
            5,
            5,
        ),
    ]
}

fn law_of_club() -> Vec<Scene> {
    let chapter = Chapter::new(2, "The Law of Club");
    vec![
        chapter.story(
            5,
            "You have learned the law of club and fang. A new life begins in the North.\n\nDo you trust humans after this?",
            [
                pick("Never again", &[(Wildness, 2), (Loyalty, -2)], 6),
                pick("Only the ones who are kind", &[(Loyalty, 1), (Survival, 1)], 6),
                pick("You trust no one, only yourself", &[(Survival, 2), (Morale, -1)], 24),
                pick("You don't have time to think about trust", &[(Fatigue, 1)], 6),
            ],
        ),
        chapter.story(
            24,
            "You move through camp like a shadow.\n\nIs isolation a shield or a wound?",
            [
                pick("A shield", &[(Survival, 1), (Wildness, 1)], 6),
                pick("A wound", &[(Morale, -1), (Loyalty, 1)], 6),
                pick("Both, depending on the day", &[(Survival, 1)], 6),
                pick("You refuse to name it", &[(Morale, -1)], 6),
            ],
        ),
        chapter.story(
            6,
            "You join a sled team. The traces bite into your shoulders, but you endure.",
            [
                pick("Pull with all your strength", &[(Survival, 1), (Loyalty, 1), (Fatigue, 1)], 7),
                pick("Save your energy", &[(Survival, 1), (Fatigue, -1)], 25),
                pick("Watch the other dogs", &[(Respect, 1), (Survival, 1)], 7),
                pick("Test the limits of the traces", &[(Wildness, 1), (Survival, 1)], 7),
            ],
        ),
        chapter.story(
            25,
            "You learn to measure effort, to pace yourself.\n\nIs survival a sprint or a long pull?",
            [
                pick("A sprint. Every moment counts.", &[(Survival, 1), (Fatigue, 1)], 7),
                pick("A long pull. You must endure.", &[(Survival, 2)], 7),
                pick("Both. You adapt as needed.", &[(Survival, 1), (Respect, 1)], 7),
                pick("You don't think, you just pull.", &[(Fatigue, 1)], 7),
            ],
        ),
        chapter.story(
            7,
            "A starving dog collapses beside the trail.\n\nDo you help, or keep moving?",
            [
                pick("Help, even if it slows you", &[(Loyalty, 2), (Fatigue, 1), (Hunger, 1)], 8),
                pick("Keep moving. You must survive", &[(Survival, 2), (Morale, -1)], 26),
                pick("Look away and pull harder", &[(Wildness, 1), (Survival, 1)], 8),
                pick("Snarl at the men who ignore it", &[(Wildness, 1), (Respect, 1)], 8),
            ],
        ),
        chapter.story(
            26,
            "You leave the fallen dog behind.\n\nDoes that choice make you stronger or emptier?",
            [
                pick("Stronger. You had no choice.", &[(Survival, 1), (Morale, -1)], 8),
                pick("Emptier. Something inside you hurts.", &[(Morale, -2), (Loyalty, 1)], 8),
                pick("Both. The trail takes and gives.", &[(Survival, 1)], 8),
                pick("You refuse to think about it.", &[(Fatigue, 1)], 8),
            ],
        ),
    ]
}

fn sled_team() -> Vec<Scene> {
    let chapter = Chapter::new(3, "The Sled Team");
    vec![
        chapter.story(
            8,
            "Spitz eyes you with hostility. Each day, the tension grows.\n\nDo you feel more like a wolf or a dog today?",
            [
                pick("A wolf", &[(Wildness, 2), (Respect, 1)], 9),
                pick("A dog", &[(Loyalty, 2)], 9),
                pick("Something in between", &[(Morale, 1)], 27),
                pick("Neither. You are something new.", &[(Wildness, 1), (Survival, 1)], 9),
            ],
        ),
        chapter.story(
            27,
            "You walk the line between worlds.\n\nDoes that make you unstable or powerful?",
            [
                pick("Unstable. You feel torn.", &[(Morale, -1)], 9),
                pick("Powerful. You can choose.", &[(Survival, 1), (Wildness, 1)], 9),
                pick("Both. It depends on the day.", &[(Morale, 1)], 9),
                pick("You stop trying to define it.", &[(Fatigue, 1)], 9),
            ],
        ),
        chapter.story(
            9,
            "Under the northern lights, the team grows restless. A fight feels inevitable.",
            [
                Choice::new("Prepare yourself for the challenge")
                    .with_effect(Effect::from_pairs(&[(Survival, 1), (Wildness, 1), (Fatigue, 1)]))
                    .branch(Condition::at_least(Wildness, 5), 10)
                    .branch(Condition::below(Wildness, 5), 11),
                pick("Stay close to the others", &[(Loyalty, 1), (Respect, 1)], 11),
                pick("Study Spitz's weaknesses", &[(Survival, 1), (Respect, 1)], 28),
                pick("Imagine life without him", &[(Wildness, 1), (Morale, 1)], 11),
            ],
        ),
        chapter.story(
            28,
            "You watch his gait, his temper, his pride.\n\nIs leadership taken by force or earned over time?",
            [
                pick("Taken by force", &[(Wildness, 2), (Respect, 1)], 10),
                pick("Earned over time", &[(Loyalty, 1), (Respect, 1)], 11),
                pick("Both. The pack respects results.", &[(Survival, 1), (Respect, 1)], 10),
                pick("You don't care, you just want him gone.", &[(Wildness, 1)], 10),
            ],
        ),
        chapter.story(
            10,
            "You feel power in your limbs. The pack senses your rising strength.",
            [
                pick("Challenge Spitz openly", &[(Wildness, 2), (Respect, 1)], 12),
                pick("Wait for the perfect moment", &[(Survival, 1)], 12),
                pick("Provoke him into making a mistake", &[(Wildness, 1), (Survival, 1)], 12),
                pick("Let the pack push you forward", &[(Respect, 1)], 12),
            ],
        ),
        chapter.story(
            11,
            "You bide your time, watching Spitz's every move. The snow hides many secrets.",
            [
                pick("Ambush him when he is distracted", &[(Wildness, 1), (Survival, 1)], 12),
                pick("Let him make the first move", &[(Survival, 1), (Fatigue, 1)], 12),
                pick("Test him with small challenges", &[(Respect, 1)], 12),
                pick("Imagine the pack with you at the front", &[(Morale, 1), (Respect, 1)], 12),
            ],
        ),
        chapter.battle(
            12,
            "Spitz steps forward, teeth bared. The pack circles. This is your moment.",
            "spitz",
            13,
            13,
        ),
    ]
}

fn leadership() -> Vec<Scene> {
    let chapter = Chapter::new(4, "The Fight for Leadership");
    vec![
        chapter.story(
            13,
            "Spitz falls. The pack looks to you. A new leader rises in the snow.\n\nHow will you lead?",
            [
                pick("With strength and fear", &[(Wildness, 3), (Respect, 2)], 14),
                pick("With balance and care", &[(Loyalty, 2), (Survival, 1), (Respect, 1)], 29),
                pick("With distance, as a lone power", &[(Survival, 2), (Morale, -1)], 14),
                pick("You don't choose. The pack chooses you.", &[(Respect, 2)], 14),
            ],
        ),
        chapter.story(
            29,
            "You keep the team moving, fed, and alive.\n\nIs leadership a burden or a gift?",
            [
                pick("A burden", &[(Fatigue, 1), (Survival, 1)], 14),
                pick("A gift", &[(Morale, 1), (Respect, 1)], 14),
                pick("Both. It weighs and lifts you.", &[(Survival, 1), (Morale, 1)], 14),
                pick("You don't think about it. You just lead.", &[(Fatigue, 1)], 14),
            ],
        ),
        chapter.story(
            14,
            "In time, you find John Thornton, a man who treats you with kindness.\n\nWhat does his kindness awaken in you?",
            [
                pick("A fierce new loyalty", &[(Loyalty, 3), (Morale, 1)], 30),
                pick("A fear of losing him", &[(Survival, 1), (Morale, -1)], 15),
                pick("A confusion between wild and tame", &[(Wildness, 1), (Loyalty, 1)], 15),
                pick("A longing you can't name", &[(Morale, 1)], 15),
            ],
        ),
        chapter.story(
            30,
            "You rest your head in his hands.\n\nIs love a chain, a shelter, or both?",
            [
                pick("A chain", &[(Wildness, 1), (Loyalty, -1)], 15),
                pick("A shelter", &[(Loyalty, 2), (Morale, 1)], 15),
                pick("Both", &[(Survival, 1)], 15),
                pick("You don't care what it is. You feel it.", &[(Morale, 1)], 15),
            ],
        ),
    ]
}

fn the_call() -> Vec<Scene> {
    let chapter = Chapter::new(5, "The Call of the Wild");
    vec![
        chapter.story(
            15,
            "The call of the wild echoes through the trees. Wolves watch from afar.\n\nIs freedom worth loneliness?",
            [
                Choice::new("Yes. Freedom above all")
                    .with_effect(Effect::from_pairs(&[(Wildness, 3), (Loyalty, -1)]))
                    .branch(Condition::at_least(Wildness, 8), 31)
                    .branch(Condition::below(Wildness, 8), 16),
                pick("No. Love matters more", &[(Loyalty, 3), (Morale, 1)], 16),
                pick("You want both, somehow", &[(Survival, 1), (Morale, 1)], 16),
                pick("You don't answer yet. You listen.", &[(Morale, 1), (Fatigue, -1)], 16),
            ],
        ),
        chapter.story(
            31,
            "You run with the wolves beneath the stars.\n\nDo you feel like you are returning to something old, or becoming something new?",
            [
                pick("Returning to something ancient", &[(Wildness, 2)], 16),
                pick("Becoming something new", &[(Survival, 1), (Morale, 1)], 16),
                pick("Both. Old blood, new path.", &[(Wildness, 1), (Respect, 1)], 16),
                pick("You don't think. You just run.", &[(Fatigue, 1)], 16),
            ],
        ),
    ]
}

fn thornton() -> Vec<Scene> {
    let chapter = Chapter::new(6, "Thornton");
    vec![
        chapter.story(
            16,
            "You range farther each day. One evening, you return to find smoke and silence.",
            [
                pick("Search the camp", &[(Survival, 1), (Cold, 1)], 32),
                pick("Howl into the night", &[(Wildness, 1), (Morale, -1)], 17),
                pick("Circle the perimeter", &[(Survival, 1), (Respect, 1)], 17),
                pick("Refuse to believe what you smell", &[(Morale, -1)], 17),
            ],
        ),
        chapter.story(
            32,
            "You nose through ashes, torn canvas, and blood.\n\nIs grief a weight, a fire, or a map?",
            [
                pick("A weight", &[(Fatigue, 1), (Morale, -1)], 17),
                pick("A fire", &[(Wildness, 1), (Survival, 1)], 17),
                pick("A map", &[(Survival, 1), (Respect, 1)], 17),
                pick("You can't name it. You just feel it.", &[(Morale, -1)], 17),
            ],
        ),
        chapter.story(
            17,
            "The men who killed Thornton still linger nearby, laughing in the dark.\n\nWhat does justice mean to you now?",
            [
                pick("Blood for blood", &[(Wildness, 2), (Survival, 1)], 18),
                pick("End their threat, then vanish", &[(Survival, 2), (Respect, 1)], 18),
                pick("Let the wild judge them", &[(Morale, 1), (Wildness, 1)], 18),
                pick("You don't think. You move.", &[(Fatigue, 1)], 18),
            ],
        ),
    ]
}

fn blood_on_the_snow() -> Vec<Scene> {
    let chapter = Chapter::new(7, "Blood on the Snow");
    vec![
        chapter.battle(
            18,
            "You face the men who took Thornton's life. Firelight flickers on their rifles.",
            "humans",
            19,
            19,
        ),
        chapter.story(
            19,
            "The camp is silent. The wild waits. Your path is now your own.",
            [
                pick("Answer the call completely", &[(Wildness, 2)], SceneTarget::End),
                pick("Carry Thornton in your heart", &[(Loyalty, 2)], SceneTarget::End),
                pick("Walk between worlds, never choosing fully", &[(Survival, 1), (Morale, 1)], SceneTarget::End),
                pick("Let the snow cover your tracks", &[(Respect, 1)], SceneTarget::End),
            ],
        ),
    ]
}
