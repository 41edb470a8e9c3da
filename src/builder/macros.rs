//! Macros for ergonomic state machine construction.

/// Build a [`StateMachine`](crate::runtime::StateMachine) declaratively.
///
/// Expands to [`StateMachineBuilder`](crate::builder::StateMachineBuilder)
/// calls and evaluates to `Result<StateMachine<T, E>, BuildError>`.
///
/// # Example
///
/// ```
/// use entity_fsm::core::State;
/// use entity_fsm::runtime::StateMachine;
/// use entity_fsm::state_machine;
///
/// struct Player;
/// struct Idle;
/// struct Moving;
/// impl State<Player> for Idle {}
/// impl State<Player> for Moving {}
///
/// let machine: StateMachine<Player> = state_machine! {
///     entity: "Player",
///     default: "Idle",
///     states: {
///         "Idle" => Idle,
///         "Moving" => Moving,
///     }
/// }
/// .unwrap();
///
/// assert_eq!(machine.registry().len(), 2);
/// ```
#[macro_export]
macro_rules! state_machine {
    (
        $(entity: $entity:expr,)?
        $(default: $default:expr,)?
        states: {
            $($name:expr => $state:expr),* $(,)?
        } $(,)?
    ) => {
        $crate::builder::StateMachineBuilder::new()
            $(.entity_name($entity))?
            $(.default_state($default))?
            $(.state($name, $state))*
            .build()
    };
}

#[cfg(test)]
mod tests {
    use crate::builder::BuildError;
    use crate::core::State;
    use crate::runtime::StateMachine;

    struct Player;

    struct Idle;
    impl State<Player> for Idle {}

    struct Moving;
    impl State<Player> for Moving {}

    #[test]
    fn state_machine_macro_registers_states() {
        let machine: StateMachine<Player> = state_machine! {
            entity: "Hero",
            default: "Idle",
            states: {
                "Idle" => Idle,
                "Moving" => Moving,
            }
        }
        .unwrap();

        assert_eq!(machine.entity_name(), "Hero");
        assert_eq!(machine.default_state(), Some("Idle"));
        let names: Vec<&str> = machine.registry().state_names().collect();
        assert_eq!(names, vec!["Idle", "Moving"]);
    }

    #[test]
    fn state_machine_macro_works_without_entity_or_default() {
        let machine: StateMachine<Player> = state_machine! {
            states: { "Idle" => Idle }
        }
        .unwrap();

        assert_eq!(machine.entity_name(), "Player");
        assert!(machine.default_state().is_none());
    }

    #[test]
    fn state_machine_macro_surfaces_build_errors() {
        let result: Result<StateMachine<Player>, BuildError> = state_machine! {
            default: "Flying",
            states: { "Idle" => Idle }
        };

        assert!(matches!(result, Err(BuildError::UnknownDefaultState(_))));
    }
}
