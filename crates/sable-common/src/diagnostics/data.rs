//! Diagnostic codes and message templates emitted by the resolution engine.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const KEYWORD_THIS_UNAVAILABLE: u32 = 26;
    pub const CANNOT_ACCESS_NONSTATIC_MEMBER_OF_OUTER_TYPE: u32 = 38;
    pub const NAME_DOES_NOT_EXIST_IN_CONTEXT: u32 = 103;
    pub const AMBIGUOUS_REFERENCE: u32 = 104;
    pub const TYPE_DOES_NOT_CONTAIN_DEFINITION: u32 = 117;
    pub const EXPRESSION_DENOTES_WRONG_KIND: u32 = 118;
    pub const OBJECT_REFERENCE_REQUIRED: u32 = 120;
    pub const MEMBER_IS_INACCESSIBLE: u32 = 122;
    pub const STATIC_MEMBER_ACCESSED_WITH_INSTANCE_REFERENCE: u32 = 176;
    pub const TYPE_OR_NAMESPACE_DOES_NOT_EXIST_IN_NAMESPACE: u32 = 234;
    pub const TYPE_OR_NAMESPACE_NOT_FOUND: u32 = 246;
    pub const GENERIC_REQUIRES_TYPE_ARGUMENTS: u32 = 305;
    pub const NON_GENERIC_USED_WITH_TYPE_ARGUMENTS: u32 = 308;
    pub const METHOD_REFERENCED_WITHOUT_PARENTHESES: u32 = 654;
    pub const PROTECTED_MEMBER_THROUGH_WRONG_QUALIFIER: u32 = 1540;
}

pub mod diagnostic_messages {
    pub const KEYWORD_THIS_UNAVAILABLE: &str =
        "Keyword 'this' is not valid in a static property, static method, or static field initializer";
    pub const CANNOT_ACCESS_NONSTATIC_MEMBER_OF_OUTER_TYPE: &str =
        "Cannot access a nonstatic member of outer type '{0}' via nested type '{1}'";
    pub const NAME_DOES_NOT_EXIST_IN_CONTEXT: &str =
        "The name '{0}' does not exist in the context of '{1}'";
    pub const AMBIGUOUS_REFERENCE: &str =
        "'{0}' is an ambiguous reference between '{1}' and '{2}'";
    pub const TYPE_DOES_NOT_CONTAIN_DEFINITION: &str =
        "Type '{0}' does not contain a definition for '{1}'";
    pub const EXPRESSION_DENOTES_WRONG_KIND: &str =
        "Expression denotes a '{0}', where a '{1}' was expected";
    pub const OBJECT_REFERENCE_REQUIRED: &str =
        "An object reference is required for the nonstatic field, method or property '{0}'";
    pub const MEMBER_IS_INACCESSIBLE: &str =
        "'{0}' is inaccessible due to its protection level";
    pub const STATIC_MEMBER_ACCESSED_WITH_INSTANCE_REFERENCE: &str =
        "Static member '{0}' cannot be accessed with an instance reference; qualify it with a type name instead";
    pub const TYPE_OR_NAMESPACE_DOES_NOT_EXIST_IN_NAMESPACE: &str =
        "The type or namespace name '{0}' does not exist in the namespace '{1}'";
    pub const TYPE_OR_NAMESPACE_NOT_FOUND: &str =
        "The type or namespace name '{0}' could not be found";
    pub const GENERIC_REQUIRES_TYPE_ARGUMENTS: &str =
        "Using the generic {0} '{1}' requires {2} type arguments";
    pub const NON_GENERIC_USED_WITH_TYPE_ARGUMENTS: &str =
        "The non-generic {0} '{1}' cannot be used with type arguments";
    pub const METHOD_REFERENCED_WITHOUT_PARENTHESES: &str =
        "Method '{0}' is referenced without parentheses";
    pub const PROTECTED_MEMBER_THROUGH_WRONG_QUALIFIER: &str =
        "Cannot access protected member '{0}' via a qualifier of type '{1}'; the qualifier must be of type '{2}' (or derived from it)";
}

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::KEYWORD_THIS_UNAVAILABLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::KEYWORD_THIS_UNAVAILABLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_ACCESS_NONSTATIC_MEMBER_OF_OUTER_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_ACCESS_NONSTATIC_MEMBER_OF_OUTER_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NAME_DOES_NOT_EXIST_IN_CONTEXT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NAME_DOES_NOT_EXIST_IN_CONTEXT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_REFERENCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AMBIGUOUS_REFERENCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_DOES_NOT_CONTAIN_DEFINITION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_DOES_NOT_CONTAIN_DEFINITION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_DENOTES_WRONG_KIND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPRESSION_DENOTES_WRONG_KIND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OBJECT_REFERENCE_REQUIRED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OBJECT_REFERENCE_REQUIRED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MEMBER_IS_INACCESSIBLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MEMBER_IS_INACCESSIBLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::STATIC_MEMBER_ACCESSED_WITH_INSTANCE_REFERENCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::STATIC_MEMBER_ACCESSED_WITH_INSTANCE_REFERENCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_OR_NAMESPACE_DOES_NOT_EXIST_IN_NAMESPACE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_OR_NAMESPACE_DOES_NOT_EXIST_IN_NAMESPACE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_OR_NAMESPACE_NOT_FOUND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::GENERIC_REQUIRES_TYPE_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::GENERIC_REQUIRES_TYPE_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NON_GENERIC_USED_WITH_TYPE_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NON_GENERIC_USED_WITH_TYPE_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::METHOD_REFERENCED_WITHOUT_PARENTHESES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::METHOD_REFERENCED_WITHOUT_PARENTHESES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROTECTED_MEMBER_THROUGH_WRONG_QUALIFIER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROTECTED_MEMBER_THROUGH_WRONG_QUALIFIER,
    },
];
