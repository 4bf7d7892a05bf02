use study_core::model::Language;

/// Interface strings for one display language.
#[derive(Debug, PartialEq, Eq)]
pub struct Labels {
    pub app_title: &'static str,
    pub nav_levels: &'static str,
    pub nav_admin: &'static str,
    pub language_toggle: &'static str,
    pub sign_in: &'static str,
    pub sign_out: &'static str,
    pub back: &'static str,
    pub loading: &'static str,
    pub retry: &'static str,
    pub unavailable: &'static str,

    pub hero: &'static str,
    pub subtitle: &'static str,
    pub get_started: &'static str,
    pub search_placeholder: &'static str,
    pub search_button: &'static str,
    pub search_no_match: &'static str,
    pub continue_reading: &'static str,

    pub levels_title: &'static str,
    pub subjects: &'static str,
    pub lectures: &'static str,
    pub no_subjects: &'static str,
    pub no_lectures: &'static str,
    pub progress: &'static str,

    pub summary_tab: &'static str,
    pub flashcards_tab: &'static str,
    pub quiz_tab: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
    pub click_to_flip: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub of: &'static str,
    pub no_flashcards: &'static str,
    pub no_quiz: &'static str,
    pub check_answer: &'static str,
    pub next_question: &'static str,
    pub finish_quiz: &'static str,
    pub score: &'static str,
    pub restart_quiz: &'static str,
    pub quiz_complete: &'static str,
    pub correct: &'static str,
    pub incorrect: &'static str,

    pub auth_title: &'static str,
    pub checking_session: &'static str,
    pub signed_in_as: &'static str,
    pub role_admin: &'static str,
    pub role_learner: &'static str,
    pub signed_out_hint: &'static str,

    pub admin_title: &'static str,
    pub import_title: &'static str,
    pub import_hint: &'static str,
    pub import_button: &'static str,
    pub importing: &'static str,
    pub seed_title: &'static str,
    pub seed_hint: &'static str,
    pub seed_button: &'static str,
    pub import_failed: &'static str,
    pub redirect_sign_in: &'static str,
    pub redirect_home: &'static str,

    pub not_found_title: &'static str,
    pub go_home: &'static str,
}

static EN: Labels = Labels {
    app_title: "UniLearn",
    nav_levels: "Levels",
    nav_admin: "Admin",
    language_toggle: "عربي",
    sign_in: "Sign In",
    sign_out: "Sign Out",
    back: "Back",
    loading: "Loading...",
    retry: "Retry",
    unavailable: "Something went wrong. Please try again.",

    hero: "Your University Study Companion",
    subtitle: "Study smarter with interactive flashcards, quizzes, and bilingual notes.",
    get_started: "Get Started",
    search_placeholder: "Search lectures...",
    search_button: "Search",
    search_no_match: "No lecture matches that search.",
    continue_reading: "Continue reading",

    levels_title: "Select Your Level",
    subjects: "subjects",
    lectures: "lectures",
    no_subjects: "No subjects available yet for this level.",
    no_lectures: "No lectures available yet.",
    progress: "Progress",

    summary_tab: "Summary Notes",
    flashcards_tab: "Flashcards",
    quiz_tab: "Quiz",
    question: "Question",
    answer: "Answer",
    click_to_flip: "Click to flip",
    previous: "Previous",
    next: "Next",
    of: "of",
    no_flashcards: "No flashcards for this lecture yet.",
    no_quiz: "No quiz questions for this lecture yet.",
    check_answer: "Check Answer",
    next_question: "Next Question",
    finish_quiz: "Finish",
    score: "Score",
    restart_quiz: "Restart Quiz",
    quiz_complete: "Quiz Complete!",
    correct: "Correct!",
    incorrect: "Incorrect",

    auth_title: "Account",
    checking_session: "Checking your session...",
    signed_in_as: "Signed in as",
    role_admin: "Administrator",
    role_learner: "Learner",
    signed_out_hint: "You are browsing as a guest. Start the app with --user <id> to sign in.",

    admin_title: "Admin Dashboard",
    import_title: "Import Subject JSON",
    import_hint: "Paste one subject object or an array of subjects, including nested lectures.",
    import_button: "Import JSON",
    importing: "Importing...",
    seed_title: "Seed Database",
    seed_hint: "Upload every bundled subject. Existing records with the same ids are updated.",
    seed_button: "Upload Bundled Catalog",
    import_failed: "Import failed",
    redirect_sign_in: "Sign in to open the admin dashboard.",
    redirect_home: "The admin dashboard is for administrators only.",

    not_found_title: "Page not found",
    go_home: "Go home",
};

static AR: Labels = Labels {
    app_title: "يوني ليرن",
    nav_levels: "المستويات",
    nav_admin: "الإدارة",
    language_toggle: "EN",
    sign_in: "تسجيل الدخول",
    sign_out: "تسجيل الخروج",
    back: "رجوع",
    loading: "جارٍ التحميل...",
    retry: "إعادة المحاولة",
    unavailable: "حدث خطأ ما. حاول مرة أخرى.",

    hero: "رفيقك الدراسي الجامعي",
    subtitle: "ادرس بذكاء مع البطاقات التعليمية التفاعلية والاختبارات والملاحظات ثنائية اللغة.",
    get_started: "ابدأ الآن",
    search_placeholder: "ابحث في المحاضرات...",
    search_button: "بحث",
    search_no_match: "لا توجد محاضرة مطابقة.",
    continue_reading: "تابع القراءة",

    levels_title: "اختر مستواك",
    subjects: "مواد",
    lectures: "محاضرات",
    no_subjects: "لا توجد مواد لهذا المستوى بعد.",
    no_lectures: "لا توجد محاضرات بعد.",
    progress: "التقدم",

    summary_tab: "ملخص الملاحظات",
    flashcards_tab: "البطاقات التعليمية",
    quiz_tab: "اختبار",
    question: "سؤال",
    answer: "إجابة",
    click_to_flip: "انقر للقلب",
    previous: "السابق",
    next: "التالي",
    of: "من",
    no_flashcards: "لا توجد بطاقات لهذه المحاضرة بعد.",
    no_quiz: "لا توجد أسئلة لهذه المحاضرة بعد.",
    check_answer: "تحقق من الإجابة",
    next_question: "السؤال التالي",
    finish_quiz: "إنهاء",
    score: "النتيجة",
    restart_quiz: "إعادة الاختبار",
    quiz_complete: "اكتمل الاختبار!",
    correct: "صحيح!",
    incorrect: "خطأ",

    auth_title: "الحساب",
    checking_session: "جارٍ التحقق من الجلسة...",
    signed_in_as: "تم تسجيل الدخول باسم",
    role_admin: "مشرف",
    role_learner: "طالب",
    signed_out_hint: "أنت تتصفح كضيف. شغّل التطبيق مع ‎--user <id>‎ لتسجيل الدخول.",

    admin_title: "لوحة الإدارة",
    import_title: "استيراد مادة بصيغة JSON",
    import_hint: "الصق مادة واحدة أو مصفوفة مواد مع المحاضرات.",
    import_button: "استيراد",
    importing: "جارٍ الاستيراد...",
    seed_title: "تهيئة قاعدة البيانات",
    seed_hint: "رفع جميع المواد المضمنة. يتم تحديث السجلات ذات المعرفات نفسها.",
    seed_button: "رفع الكتالوج المضمن",
    import_failed: "فشل الاستيراد",
    redirect_sign_in: "سجّل الدخول لفتح لوحة الإدارة.",
    redirect_home: "لوحة الإدارة مخصصة للمشرفين فقط.",

    not_found_title: "الصفحة غير موجودة",
    go_home: "العودة للرئيسية",
};

#[must_use]
pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}

/// "3 of 5" in the given language.
#[must_use]
pub fn position_label(language: Language, position: usize, total: usize) -> String {
    format!("{position} {} {total}", labels(language).of)
}
